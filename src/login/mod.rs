//! Credential-based session establishment.
//!
//! Drives the login form through the render surface: cookie banner, the
//! username/password fields, submit, then a wait for the home icon that
//! marks a signed-in session. The icon not appearing is treated as
//! presumed success, since the login frequently works while the indicator
//! is slow or replaced by a one-off dialog. Only a missing form is a
//! definite failure.

use std::time::Duration;

use tracing::{info, warn};

use crate::app::Result;
use crate::surface::RenderSurface;

const LOGIN_URL: &str = "https://www.instagram.com/accounts/login/";
const COOKIE_BUTTON: &str = r#"button[tabindex="0"]"#;
const USERNAME_FIELD: &str = r#"input[name="username"]"#;
const PASSWORD_FIELD: &str = r#"input[name="password"]"#;
const SUBMIT_BUTTON: &str = r#"button[type="submit"]"#;
const HOME_ICON: &str = r#"svg[aria-label="홈"], svg[aria-label="Home"]"#;

/// Localized labels of the post-login "save your info?" dismiss buttons.
const DISMISS_LABELS: &[&str] = &["Not Now", "나중에 하기"];

const FORM_WAIT: Duration = Duration::from_secs(10);
const HOME_WAIT: Duration = Duration::from_secs(15);
const SETTLE: Duration = Duration::from_secs(3);
const POPUP_SETTLE: Duration = Duration::from_secs(2);

/// Log in with the given credentials.
///
/// `Ok(false)` means the form could not be driven (fields missing);
/// `Ok(true)` means submitted, with the session presumed established.
/// Only surface-level failures error.
pub async fn login(surface: &dyn RenderSurface, username: &str, password: &str) -> Result<bool> {
    info!("Navigating to login page");
    surface.navigate(LOGIN_URL).await?;

    surface.click_if_present(COOKIE_BUTTON).await?;

    if !surface.wait_for_visible(USERNAME_FIELD, FORM_WAIT).await {
        warn!("Login form did not appear");
    }
    surface.pause(SETTLE).await;

    info!("Logging in as {}", username);
    if let Err(e) = surface.fill(USERNAME_FIELD, username).await {
        warn!("Could not fill username field: {}", e);
        return Ok(false);
    }
    if let Err(e) = surface.fill(PASSWORD_FIELD, password).await {
        warn!("Could not fill password field: {}", e);
        return Ok(false);
    }
    surface.click(SUBMIT_BUTTON).await?;

    if surface.wait_for_visible(HOME_ICON, HOME_WAIT).await {
        info!("Login confirmed by home icon");
    } else {
        warn!("Home icon not found; assuming login succeeded and continuing");
    }

    dismiss_popups(surface).await;
    surface.pause(POPUP_SETTLE).await;
    dismiss_popups(surface).await;
    surface.pause(SETTLE).await;

    info!("Login flow complete");
    Ok(true)
}

/// Dismiss the "save login info" / notification prompts if present.
async fn dismiss_popups(surface: &dyn RenderSurface) {
    for label in DISMISS_LABELS {
        match surface.click_button_with_text(label).await {
            Ok(true) => {
                info!("Dismissed popup: {}", label);
                return;
            }
            Ok(false) => {}
            Err(e) => warn!("Popup dismissal failed: {}", e),
        }
    }
}
