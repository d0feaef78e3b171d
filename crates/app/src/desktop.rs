use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::AppServices;
use ui::{App, UiApp, build_app_context};

struct DesktopApp {
    services: Arc<AppServices>,
    api_base_url: String,
}

impl UiApp for DesktopApp {
    fn services(&self) -> Arc<AppServices> {
        Arc::clone(&self.services)
    }

    fn api_base_url(&self) -> String {
        self.api_base_url.clone()
    }
}

/// Open the desktop window. Blocks until it is closed.
pub fn launch(services: AppServices, api_base_url: String) {
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        services: Arc::new(services),
        api_base_url,
    });
    let context = build_app_context(&app);

    // Some tao setups default to always-on-top.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("45Q Credit Assistant")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
}
