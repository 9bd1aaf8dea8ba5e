use leptos::*;
use scanview_core::{ScanHistory, ScanRecord};

/// Recent scans, newest first, with a button to view each one again.
#[component]
pub fn HistoryPanel(
    history: Signal<ScanHistory>,
    /// Called with the image URL of the record to show
    on_view: Callback<String>,
    on_clear: Callback<()>,
) -> impl IntoView {
    let records = move || history.with(|h| h.iter().cloned().collect::<Vec<ScanRecord>>());

    view! {
        <section class="card history-panel">
            <div class="card-header">
                <h2>"Scan history"</h2>
                <button
                    class="btn btn-outline"
                    disabled=move || history.with(ScanHistory::is_empty)
                    on:click=move |_| on_clear.call(())
                >
                    "Clear"
                </button>
            </div>
            <Show
                when=move || history.with(|h| !h.is_empty())
                fallback=|| view! { <p class="history-placeholder text-muted">"No scans yet"</p> }
            >
                <div class="history-list">
                    <For
                        each=records
                        key=|record| (record.file_path.clone(), record.timestamp.clone())
                        children=move |record| {
                            let url = record.file_path.clone();
                            view! {
                                <div class="history-item">
                                    <img
                                        class="history-img"
                                        src=record.file_path.clone()
                                        alt="Scan result"
                                        loading="lazy"
                                    />
                                    <div class="history-content">
                                        <div class="history-title">{record.device.display_name().to_string()}</div>
                                        <div class="history-info">{record.timestamp.clone()}</div>
                                        <div class="history-info">{record.area_label()}</div>
                                        <button
                                            class="btn btn-outline"
                                            on:click=move |_| on_view.call(url.clone())
                                        >
                                            "View"
                                        </button>
                                    </div>
                                </div>
                            }
                        }
                    />
                </div>
            </Show>
        </section>
    }
}
