use crate::error::{RevelaError, RevelaResult};

pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Icon identifier resolved by the (external) icon set.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IconId(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavTarget {
    /// "Start a project" — the contact destination.
    Contact,
    /// "Learn about us" — links back to this page.
    AboutSelf,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ValueProp {
    pub icon: IconId,
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub specialty: String,
    #[serde(default)]
    pub image: Option<String>,
    pub bio: String,
}

impl TeamMember {
    /// A missing or failed portrait never fails the section; it renders as
    /// the shared placeholder asset.
    pub fn image_or_placeholder(&self) -> &str {
        match self.image.as_deref() {
            Some(path) if !path.trim().is_empty() => path,
            _ => PLACEHOLDER_IMAGE,
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct StudioFeature {
    pub icon: IconId,
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct StatDef {
    pub icon: IconId,
    pub target: i64,
    pub suffix: String,
    pub label: String,
    pub description: String,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CtaContent {
    pub heading: String,
    pub body: String,
    pub primary_label: String,
    pub primary_target: NavTarget,
    pub secondary_label: String,
    pub secondary_target: NavTarget,
}

/// Everything the About page renders: plain attribute bags, no behavior.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PageContent {
    pub hero_kicker: String,
    pub hero_heading: String,
    pub hero_subtitle: String,
    pub story_heading: String,
    pub story_paragraphs: Vec<String>,
    pub values: Vec<ValueProp>,
    pub stats: Vec<StatDef>,
    pub studio_features: Vec<StudioFeature>,
    pub team: Vec<TeamMember>,
    pub cta: CtaContent,
}

impl PageContent {
    pub fn from_json(json: &str) -> RevelaResult<Self> {
        let content: Self = serde_json::from_str(json)
            .map_err(|e| RevelaError::content(format!("invalid page content: {e}")))?;
        content.validate()?;
        Ok(content)
    }

    pub fn validate(&self) -> RevelaResult<()> {
        if self.hero_heading.trim().is_empty() {
            return Err(RevelaError::content("hero heading must be non-empty"));
        }
        if self.story_paragraphs.is_empty() {
            return Err(RevelaError::content("story needs at least one paragraph"));
        }
        for stat in &self.stats {
            if stat.target < 0 {
                return Err(RevelaError::content(format!(
                    "stat '{}' target must be >= 0",
                    stat.label
                )));
            }
        }
        for member in &self.team {
            if member.name.trim().is_empty() {
                return Err(RevelaError::content("team member name must be non-empty"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(image: Option<&str>) -> TeamMember {
        TeamMember {
            name: "Alexandra Sterling".into(),
            role: "Founder & Creative Director".into(),
            specialty: "Weddings & Portraits".into(),
            image: image.map(String::from),
            bio: "Visionary leader.".into(),
        }
    }

    #[test]
    fn missing_media_falls_back_to_placeholder() {
        assert_eq!(member(None).image_or_placeholder(), PLACEHOLDER_IMAGE);
        assert_eq!(member(Some("  ")).image_or_placeholder(), PLACEHOLDER_IMAGE);
        assert_eq!(
            member(Some("/team/alex.png")).image_or_placeholder(),
            "/team/alex.png"
        );
    }

    #[test]
    fn malformed_json_is_a_content_error() {
        let err = PageContent::from_json("{").unwrap_err();
        assert!(matches!(err, RevelaError::Content(_)));
    }

    #[test]
    fn negative_stat_target_is_rejected() {
        let json = serde_json::json!({
            "hero_kicker": "About Us",
            "hero_heading": "A Legacy of Excellence",
            "hero_subtitle": "Exceptional photography.",
            "story_heading": "Our Story",
            "story_paragraphs": ["Founded with passion."],
            "values": [],
            "stats": [{
                "icon": "award", "target": -1, "suffix": "+",
                "label": "Years", "description": "Experience"
            }],
            "studio_features": [],
            "team": [],
            "cta": {
                "heading": "Ready?",
                "body": "Let's talk.",
                "primary_label": "Start Your Project",
                "primary_target": "contact",
                "secondary_label": "Learn About Us",
                "secondary_target": "about_self"
            }
        });
        let err = PageContent::from_json(&json.to_string()).unwrap_err();
        assert!(err.to_string().contains("target must be >= 0"));
    }
}
