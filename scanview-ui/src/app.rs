use crate::api;
use crate::components::{DeviceList, HistoryPanel, ScanForm, Toast, ViewerCanvas, ViewerToolbar};
use crate::hooks::{
    clear_history, load_history, load_settings, save_history, save_settings, use_toast,
    use_viewer,
};
use gloo_timers::callback::Interval;
use leptos::*;
use scanview_core::progress::TICK_MS;
use scanview_core::{
    DeviceInfo, ScanHistory, ScanProgress, ScanRecord, ScanRequest, ScannerSettings,
    ViewerConfig,
};
use wasm_bindgen::JsValue;

const CLEAR_CONFIRMATION: &str =
    "Clear all scan history? This also deletes every scan stored on the server.";

/// Local time for history entries, formatted by the browser.
fn local_timestamp() -> String {
    js_sys::Date::new_0()
        .to_locale_string("default", &JsValue::UNDEFINED)
        .into()
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Keep a restored device if it is still attached, otherwise take the first.
fn choose_device(current: Option<&DeviceInfo>, devices: &[DeviceInfo]) -> Option<DeviceInfo> {
    current
        .and_then(|c| devices.iter().find(|d| d.id_label() == c.id_label()))
        .or_else(|| devices.first())
        .cloned()
}

#[component]
pub fn App() -> impl IntoView {
    // ========== Restore persisted state ==========
    let settings = load_settings().unwrap_or_default();
    let history = create_rw_signal(load_history());
    let selected = create_rw_signal(settings.device);
    let options = create_rw_signal(settings.options);

    let devices = create_rw_signal(Vec::<DeviceInfo>::new());
    let loading_devices = create_rw_signal(false);
    let progress = create_rw_signal(ScanProgress::default());
    let status = create_rw_signal(String::from("Ready"));
    let ticker = store_value(None::<Interval>);

    let toaster = use_toast();
    let viewer = use_viewer(ViewerConfig::default());

    let report_error = move |message: String| {
        log::warn!("{}", message);
        status.set(message.clone());
        toaster.error(message);
    };

    // ========== Devices ==========
    let refresh_devices = move || {
        loading_devices.set(true);
        spawn_local(async move {
            match api::fetch_devices().await {
                Ok(list) => {
                    log::info!("Loaded {} devices", list.len());
                    if list.is_empty() {
                        toaster.info("No devices found");
                    }
                    let choice = selected.with_untracked(|s| choose_device(s.as_ref(), &list));
                    selected.set(choice);
                    devices.set(list);
                    status.set("Devices loaded".to_string());
                }
                Err(e) => report_error(format!("Failed to load devices: {e}")),
            }
            loading_devices.set(false);
        });
    };
    refresh_devices();

    // ========== Viewer ==========
    let show_image = move |url: String, success: Option<&'static str>| {
        let ticket = viewer.begin_load();
        spawn_local(async move {
            let shown = match api::load_image(&url).await {
                Ok(element) => viewer.show(ticket, &url, element),
                Err(_) if !viewer.is_current_load(ticket) => Ok(false),
                Err(e) => Err(e),
            };
            match shown {
                Ok(true) => {
                    log::info!("Showing {}", url);
                    if let Some(message) = success {
                        toaster.success(message);
                    }
                }
                Ok(false) => {}
                Err(e) => report_error(format!("Failed to show image: {e}")),
            }
        });
    };

    // ========== Scanning ==========
    let start_scan = move || {
        if progress.with_untracked(ScanProgress::is_scanning) {
            return;
        }
        let Some(device) = selected.get_untracked() else {
            report_error("Select a device first".to_string());
            return;
        };
        let request = ScanRequest {
            device,
            option: options.get_untracked(),
        };

        progress.set(ScanProgress::start());
        status.set("Preparing scan...".to_string());
        ticker.set_value(Some(Interval::new(TICK_MS, move || {
            progress.update(ScanProgress::tick);
            status.set(progress.with_untracked(ScanProgress::status));
        })));

        spawn_local(async move {
            let result = api::request_scan(&request).await;
            // Dropping the interval stops the ticks
            ticker.set_value(None);

            match result {
                Ok(scan) => {
                    progress.update(ScanProgress::complete);
                    status.set("Scan complete".to_string());
                    log::info!("Scan finished: {}", scan.url);

                    let ScanRequest { device, option } = request;
                    history.update(|h| {
                        h.push(ScanRecord {
                            device: device.clone(),
                            options: option.clone(),
                            file_path: scan.url.clone(),
                            timestamp: local_timestamp(),
                        })
                    });
                    history.with_untracked(save_history);
                    save_settings(&ScannerSettings {
                        device: Some(device),
                        options: option,
                    });

                    show_image(scan.url, None);
                }
                Err(e) => {
                    progress.update(ScanProgress::fail);
                    report_error(format!("Scan failed: {e}"));
                }
            }
        });
    };

    // ========== History ==========
    let view_record = move |url: String| show_image(url, Some("Loaded scan from history"));

    let clear_all = move || {
        if !confirm(CLEAR_CONFIRMATION) {
            return;
        }
        spawn_local(async move {
            match api::clear_attachments().await {
                Ok(()) => {
                    history.update(ScanHistory::clear);
                    clear_history();
                    viewer.clear();
                    status.set("Ready".to_string());
                    toaster.success("Scan history cleared");
                }
                Err(e) => report_error(format!("Failed to clear history: {e}")),
            }
        });
    };

    let scanning = Signal::derive(move || progress.with(ScanProgress::is_scanning));
    let percent = Signal::derive(move || progress.with(ScanProgress::percent));

    view! {
        <div class="app">
            <header class="app-header">
                <h1>"Scanner"</h1>
            </header>
            <main class="layout">
                <aside class="sidebar">
                    <DeviceList
                        devices=devices.into()
                        selected=selected
                        loading=loading_devices.into()
                        on_refresh=Callback::new(move |_| refresh_devices())
                    />
                    <ScanForm
                        options=options
                        scanning=scanning
                        progress=percent
                        status=status.into()
                        on_scan=Callback::new(move |_| start_scan())
                    />
                </aside>
                <section class="card preview">
                    <ViewerToolbar viewer=viewer />
                    <ViewerCanvas viewer=viewer />
                </section>
            </main>
            <HistoryPanel
                history=history.into()
                on_view=Callback::new(view_record)
                on_clear=Callback::new(move |_| clear_all())
            />
            <Toast message=toaster.message() />
        </div>
    }
}
