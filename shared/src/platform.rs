use crate::facility::Facility;
use serde::Serialize;
use url::form_urlencoded;

/// The caller's device family, as far as it affects which links we hand out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, specta::Type)]
#[serde(rename_all = "camelCase")]
pub enum Platform {
    Ios,
    Android,
    #[default]
    Other,
}

/// Links a client can open for a facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, specta::Type)]
pub struct Links {
    pub directions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share: Option<String>,
}

impl Platform {
    pub fn from_user_agent(user_agent: &str) -> Self {
        if ["iPad", "iPhone", "iPod"]
            .iter()
            .any(|device| user_agent.contains(device))
        {
            Platform::Ios
        } else if user_agent.to_ascii_lowercase().contains("android") {
            Platform::Android
        } else {
            Platform::Other
        }
    }

    pub fn is_mobile(self) -> bool {
        self != Platform::Other
    }

    pub fn directions_url(self, facility: &Facility) -> String {
        match self {
            Platform::Ios => format!(
                "https://maps.apple.com/?daddr={},{}&dirflg=d",
                facility.latitude, facility.longitude
            ),
            Platform::Android | Platform::Other => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("api", "1")
                    .append_pair("destination", &facility.full_address())
                    .append_pair("travelmode", "driving")
                    .finish();
                format!("https://www.google.com/maps/dir/?{query}")
            }
        }
    }

    /// `tel:` link with only the digits of the phone number.
    pub fn call_url(self, facility: &Facility) -> Option<String> {
        let digits = facility
            .phone
            .as_deref()?
            .chars()
            .filter(char::is_ascii_digit)
            .collect::<String>();
        (!digits.is_empty()).then(|| format!("tel:{digits}"))
    }

    /// Only mobile platforms get a share link; desktop browsers have no share sheet.
    pub fn share_url(self, facility: &Facility) -> Option<String> {
        self.is_mobile().then(|| {
            format!(
                "https://maps.google.com/?q={},{}",
                facility.latitude, facility.longitude
            )
        })
    }

    pub fn links(self, facility: &Facility) -> Links {
        Links {
            directions: self.directions_url(facility),
            call: self.call_url(facility),
            share: self.share_url(facility),
        }
    }
}
