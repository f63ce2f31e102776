//! Controller module - Application logic and event handling
//!
//! - `input`: key and mouse event handling
//! - `search`: the search-and-fetch workflow
//! - `navigation`: scrolling, hover and selection in the results grid

mod input;
mod search;
mod navigation;

use std::sync::Arc;

use crate::animation::FeedbackAnimator;
use crate::model::{AppModel, CatalogApi, CatalogError};

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<AppModel>,
    pub(crate) catalog: Arc<dyn CatalogApi>,
    pub(crate) animator: Arc<FeedbackAnimator>,
    back_to_top_threshold: u16,
}

impl AppController {
    pub fn new(
        model: Arc<AppModel>,
        catalog: Arc<dyn CatalogApi>,
        animator: Arc<FeedbackAnimator>,
        back_to_top_threshold: u16,
    ) -> Self {
        Self {
            model,
            catalog,
            animator,
            back_to_top_threshold,
        }
    }

    pub(crate) fn format_error(error: &CatalogError) -> String {
        let error_str = error.to_string();

        if error_str.contains("429") {
            "rate limited, please wait a moment".to_string()
        } else if matches!(error, CatalogError::Auth(_)) {
            "could not authenticate with Spotify, check the client id and secret".to_string()
        } else if error_str.contains("404") {
            "not found".to_string()
        } else if error_str.contains("error sending request") || error_str.contains("dns") {
            "service unavailable, check your connection".to_string()
        } else {
            error_str
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_get_a_credentials_hint() {
        let message = AppController::format_error(&CatalogError::Auth("invalid_client".into()));
        assert!(message.contains("client id"));
    }

    #[test]
    fn rate_limits_are_recognised() {
        let message = AppController::format_error(&CatalogError::Transport("http status: 429".into()));
        assert_eq!(message, "rate limited, please wait a moment");
    }

    #[test]
    fn unknown_errors_pass_through() {
        let message = AppController::format_error(&CatalogError::InvalidId("zzz".into()));
        assert_eq!(message, "invalid id: zzz");
    }
}
