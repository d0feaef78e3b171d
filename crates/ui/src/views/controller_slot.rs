use dioxus::prelude::*;

/// Run `action` against a controller parked in a signal.
///
/// The controller is taken out for the duration of the call and always put
/// back, so a failed request leaves the view usable. Returns `None` when the
/// slot is empty, i.e. another action is still in flight.
pub(crate) async fn run_with<C: 'static, T>(
    mut slot: Signal<Option<C>>,
    action: impl AsyncFnOnce(&mut C) -> T,
) -> Option<T> {
    let mut controller = slot.write().take()?;
    let out = action(&mut controller).await;
    slot.set(Some(controller));
    Some(out)
}
