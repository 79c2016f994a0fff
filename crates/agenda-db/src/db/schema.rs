// Mirrors migrations/2025-03-01-000000_create_booking.

diesel::table! {
    booking_session (id) {
        id -> Uuid,
        owner_id -> Uuid,
        series_id -> Nullable<Uuid>,
        client_id -> Nullable<Uuid>,
        client_name -> Text,
        email -> Text,
        phone -> Text,
        category -> Text,
        session_date -> Date,
        start_time -> Time,
        end_time -> Nullable<Time>,
        location -> Text,
        city -> Text,
        description -> Text,
        price_cents -> Int8,
        photographers -> Array<Text>,
        status -> Text,
        external_link -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    registry_client (id) {
        id -> Uuid,
        name -> Text,
        email -> Text,
        phone -> Text,
    }
}

diesel::table! {
    registry_photographer (id) {
        id -> Uuid,
        name -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(booking_session, registry_client, registry_photographer);
