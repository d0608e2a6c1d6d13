use serde::{Deserialize, Serialize};

/// Value of a style layer's `layout.visibility` property.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Visible,
    None,
}

impl Visibility {
    pub fn from_bool(visible: bool) -> Self {
        if visible {
            Visibility::Visible
        } else {
            Visibility::None
        }
    }

    pub fn is_visible(self) -> bool {
        self == Visibility::Visible
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Visible => "visible",
            Visibility::None => "none",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Visibility;

    #[test]
    fn visibility_helpers() {
        assert!(Visibility::from_bool(true).is_visible());
        assert!(!Visibility::from_bool(false).is_visible());
        assert_eq!(Visibility::None.as_str(), "none");
        assert_eq!(
            serde_json::to_string(&Visibility::Visible).unwrap(),
            "\"visible\""
        );
    }
}
