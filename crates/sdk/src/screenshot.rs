use async_trait::async_trait;

/// Errors a screenshot provider may surface.
///
/// Providers must fail with one of these rather than hand back a malformed
/// image.
#[derive(Debug, thiserror::Error)]
pub enum ScreenshotError {
    #[error("screenshot capture failed: {0}")]
    Capture(String),

    #[error("captured image is empty")]
    EmptyImage,
}

/// Collaborator that rasterizes the visible page.
///
/// Implementations return a data-URL encoded image of the page body and must
/// honor the exclusion rules so the reporter's own UI and transient overlays
/// never appear in the capture.
#[async_trait]
pub trait ScreenshotProvider: Send + Sync {
    async fn capture(&self, rules: &ExclusionRules) -> Result<String, ScreenshotError>;
}

/// Elements the screenshot provider must leave out of the capture.
///
/// The defaults cover the reporter's own widget plus the usual overlay and
/// portal containers.
#[derive(Debug, Clone)]
pub struct ExclusionRules {
    /// Class-attribute fragments; substring match.
    pub class_fragments: Vec<String>,
    /// ARIA roles excluded outright.
    pub roles: Vec<String>,
    /// Marker attributes excluded outright.
    pub attributes: Vec<String>,
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self {
            class_fragments: [
                "bug-reporter-widget",
                "bug-reporter-sdk",
                "radix-portal",
                "toast",
                "modal",
                "overlay",
                "popup",
                "dropdown",
                "tooltip",
                "popover",
                "dialog",
                "notification",
            ]
            .map(String::from)
            .to_vec(),
            roles: ["dialog", "alertdialog", "tooltip", "menu"]
                .map(String::from)
                .to_vec(),
            attributes: [
                "data-radix-portal",
                "data-sonner-toaster",
                "data-html2canvas-ignore",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

impl ExclusionRules {
    /// Whether an element with this class attribute is excluded.
    pub fn excludes_class(&self, class_attr: &str) -> bool {
        self.class_fragments
            .iter()
            .any(|fragment| class_attr.contains(fragment))
    }

    /// Whether an element with this ARIA role is excluded.
    pub fn excludes_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Whether an element carrying this attribute is excluded.
    pub fn excludes_attribute(&self, attribute: &str) -> bool {
        self.attributes.iter().any(|a| a == attribute)
    }

    /// The combined predicate: true when any rule matches.
    pub fn excludes_element(
        &self,
        class_attr: &str,
        role: Option<&str>,
        attributes: &[&str],
    ) -> bool {
        self.excludes_class(class_attr)
            || role.is_some_and(|r| self.excludes_role(r))
            || attributes.iter().any(|a| self.excludes_attribute(a))
    }
}
