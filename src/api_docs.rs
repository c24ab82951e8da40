use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::game::get_game,
        api::rankings::get_rankings,
        // Add other endpoints here as we document them
    ),
    tags(
        (name = "stratquest", description = "StratQuest API")
    )
)]
pub struct ApiDoc;
