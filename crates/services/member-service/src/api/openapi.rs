//! OpenAPI documentation configuration.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{member_handler, trainer_handler};
use domain::{
    CreateMember, CreateTrainer, FailureKind, Member, MemberCampaignDetailDto, MemberDetailDto,
    Trainer, TrainerDetailDto,
};

/// OpenAPI documentation for the member service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Member Service",
        version = "0.1.0",
        description = "Gym member and trainer management. Every response body is an envelope \
                       `{ success, message?, data?, kind? }`; `kind` names the failure category."
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        member_handler::list_members,
        member_handler::list_member_details,
        member_handler::list_member_campaigns,
        member_handler::get_member,
        member_handler::get_member_details,
        member_handler::get_member_campaigns,
        member_handler::add_member,
        member_handler::update_member,
        member_handler::delete_member,
        trainer_handler::list_trainers,
        trainer_handler::list_trainer_details,
        trainer_handler::get_trainer,
        trainer_handler::add_trainer,
        trainer_handler::update_trainer,
        trainer_handler::delete_trainer,
    ),
    components(
        schemas(
            Member,
            CreateMember,
            MemberDetailDto,
            MemberCampaignDetailDto,
            Trainer,
            CreateTrainer,
            TrainerDetailDto,
            FailureKind,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Members", description = "Member management"),
        (name = "Trainers", description = "Trainer management")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "HS256 token carrying `sub`, `roles` and `exp` claims",
                        ))
                        .build(),
                ),
            );
        }
    }
}
