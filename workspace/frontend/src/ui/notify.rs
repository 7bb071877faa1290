use common::FetchFailure;

/// Message shown to the user when a prediction could not be fetched
pub const FAILURE_MESSAGE: &str = "Failed to fetch prediction!";

/// Block on a modal alert telling the user the prediction failed.
///
/// The alert text stays generic; the failure itself only goes to the log.
pub fn notify_failure(failure: &FetchFailure) {
    log::warn!("Notifying user: {}", failure);

    let Some(window) = web_sys::window() else {
        log::error!("No window available to show failure notification");
        return;
    };
    if let Err(e) = window.alert_with_message(FAILURE_MESSAGE) {
        log::error!("Failed to show failure notification: {:?}", e);
    }
}
