use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CheckInRequestDoc { pub id: String, pub flight_number: String, pub origin: String, pub destination: String }

#[derive(ToSchema)]
pub struct ReadyRequestDoc { pub collection_point: String }

/// `result` is one of `ok`, `id-already-exists`, `collected`, `invalid-owner`, `removed`, `not-present`.
#[derive(ToSchema)]
pub struct OutcomeDoc { pub result: String }

#[derive(ToSchema)]
pub struct OwnerCheckDoc { pub is_owner: bool }

#[derive(ToSchema)]
pub struct StatsDoc { pub total_bags: u64 }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String, pub message: Option<String> }

/// `status` is one of `checked-in`, `en-route`, `ready`, `collected`.
#[derive(ToSchema)]
pub struct LuggageItemDoc {
    pub id: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub owner_identity: String,
    pub check_in_time: u64,
    pub check_out_time: Option<u64>,
    pub status: String,
    pub collection_point: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::luggage::check_in,
        crate::routes::luggage::list,
        crate::routes::luggage::get,
        crate::routes::luggage::remove,
        crate::routes::luggage::en_route,
        crate::routes::luggage::ready_for_collection,
        crate::routes::luggage::collect,
        crate::routes::luggage::verify_owner,
        crate::routes::luggage::stats,
        crate::routes::admin::clear_all,
    ),
    components(
        schemas(
            HealthResponse,
            CheckInRequestDoc,
            ReadyRequestDoc,
            OutcomeDoc,
            OwnerCheckDoc,
            StatsDoc,
            ErrorDoc,
            LuggageItemDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "luggage"),
        (name = "admin")
    )
)]
pub struct ApiDoc;
