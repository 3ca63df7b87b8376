use serde::Serialize;
use shared::nearby::AnnotatedFacility;
use shared::platform::Links;

#[derive(Serialize, specta::Type)]
#[serde(rename_all = "camelCase")]
pub struct NearbyFacilityDto {
    #[serde(flatten)]
    pub facility: AnnotatedFacility,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}
