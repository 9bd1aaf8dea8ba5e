use leptos::*;
use scanview_core::DeviceInfo;

/// Attached scanners. Clicking an entry selects it.
#[component]
pub fn DeviceList(
    devices: Signal<Vec<DeviceInfo>>,
    selected: RwSignal<Option<DeviceInfo>>,
    /// True while the list is being fetched
    loading: Signal<bool>,
    on_refresh: Callback<()>,
) -> impl IntoView {
    view! {
        <section class="card device-panel">
            <div class="card-header">
                <h2>"Devices"</h2>
                <button
                    class="btn btn-outline"
                    disabled=move || loading.get()
                    on:click=move |_| on_refresh.call(())
                >
                    {move || if loading.get() { "Loading..." } else { "Refresh" }}
                </button>
            </div>
            <Show
                when=move || devices.with(|d| !d.is_empty())
                fallback=|| view! {
                    <div class="device-empty">
                        <p>"No devices found"</p>
                        <p class="text-muted small">"Check that the scanner is connected"</p>
                    </div>
                }
            >
                <ul class="device-list">
                    <For
                        each=move || devices.get()
                        key=|device| device.id_label()
                        children=move |device| {
                            let id = device.id_label();
                            let is_active = {
                                let id = id.clone();
                                move || {
                                    selected.with(|s| {
                                        s.as_ref().is_some_and(|d| d.id_label() == id)
                                    })
                                }
                            };
                            let name = device.display_name().to_string();
                            view! {
                                <li
                                    class="device-item"
                                    class:active=is_active
                                    on:click=move |_| selected.set(Some(device.clone()))
                                >
                                    <div class="device-name">{name}</div>
                                    <div class="device-id">{id}</div>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </section>
    }
}
