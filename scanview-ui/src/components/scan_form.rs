use leptos::*;
use scanview_core::ScanOptions;

const DPI_CHOICES: [u16; 6] = [100, 150, 200, 300, 400, 600];
const MODE_CHOICES: [(&str, &str); 1] = [("CGRAY", "True Gray")];

/// Editable scan option.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanField {
    Dpi,
    Mode,
    Width,
    Height,
    Left,
    Top,
}

/// Apply raw input to `options`. Unparseable or negative values are rejected
/// and leave the options unchanged.
pub fn apply_field(options: &mut ScanOptions, field: ScanField, raw: &str) -> bool {
    let raw = raw.trim();
    let mm = || raw.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0);

    match field {
        ScanField::Dpi => match raw.parse::<u16>() {
            Ok(dpi) if dpi > 0 => options.dpi = dpi,
            _ => return false,
        },
        ScanField::Mode if !raw.is_empty() => options.mode = raw.to_string(),
        ScanField::Mode => return false,
        ScanField::Width => match mm() {
            Some(v) => options.width = v,
            None => return false,
        },
        ScanField::Height => match mm() {
            Some(v) => options.height = v,
            None => return false,
        },
        ScanField::Left => match mm() {
            Some(v) => options.left = v,
            None => return false,
        },
        ScanField::Top => match mm() {
            Some(v) => options.top = v,
            None => return false,
        },
    }
    true
}

fn field_value(options: &ScanOptions, field: ScanField) -> String {
    match field {
        ScanField::Dpi => options.dpi.to_string(),
        ScanField::Mode => options.mode.clone(),
        ScanField::Width => options.width.to_string(),
        ScanField::Height => options.height.to_string(),
        ScanField::Left => options.left.to_string(),
        ScanField::Top => options.top.to_string(),
    }
}

#[component]
fn MillimetreInput(
    options: RwSignal<ScanOptions>,
    field: ScanField,
    label: &'static str,
) -> impl IntoView {
    view! {
        <label class="form-field">
            <span>{label}</span>
            <input
                type="number"
                min="0"
                step="0.001"
                prop:value=move || options.with(|o| field_value(o, field))
                on:change=move |ev| {
                    let raw = event_target_value(&ev);
                    options.update(|o| {
                        if !apply_field(o, field, &raw) {
                            log::warn!("Ignoring invalid {:?} value {:?}", field, raw);
                        }
                    });
                }
            />
        </label>
    }
}

#[component]
pub fn ScanForm(
    options: RwSignal<ScanOptions>,
    scanning: Signal<bool>,
    /// Progress bar fill in percent
    progress: Signal<f64>,
    status: Signal<String>,
    on_scan: Callback<()>,
) -> impl IntoView {
    let on_select = move |field: ScanField| {
        move |ev: web_sys::Event| {
            let raw = event_target_value(&ev);
            options.update(|o| {
                apply_field(o, field, &raw);
            });
        }
    };

    view! {
        <form
            class="card scan-form"
            on:submit=move |ev| {
                ev.prevent_default();
                on_scan.call(());
            }
        >
            <h2>"Scan settings"</h2>
            <label class="form-field">
                <span>"Resolution (DPI)"</span>
                <select
                    prop:value=move || options.with(|o| o.dpi.to_string())
                    on:change=on_select(ScanField::Dpi)
                >
                    {DPI_CHOICES
                        .iter()
                        .map(|dpi| view! { <option value={dpi.to_string()}>{dpi.to_string()}</option> })
                        .collect_view()}
                </select>
            </label>
            <label class="form-field">
                <span>"Mode"</span>
                <select
                    prop:value=move || options.with(|o| o.mode.clone())
                    on:change=on_select(ScanField::Mode)
                >
                    {MODE_CHOICES
                        .iter()
                        .map(|(value, label)| view! { <option value={*value}>{*label}</option> })
                        .collect_view()}
                </select>
            </label>
            <MillimetreInput options=options field=ScanField::Width label="Width (mm)" />
            <MillimetreInput options=options field=ScanField::Height label="Height (mm)" />
            <MillimetreInput options=options field=ScanField::Left label="Left (mm)" />
            <MillimetreInput options=options field=ScanField::Top label="Top (mm)" />

            <button type="submit" class="btn btn-primary" disabled=move || scanning.get()>
                {move || if scanning.get() { "Scanning..." } else { "Start scan" }}
            </button>
            <div class="progress">
                <div class="progress-bar" style:width=move || format!("{:.1}%", progress.get())></div>
            </div>
            <p class="scan-status">{move || status.get()}</p>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_millimetres() {
        let mut options = ScanOptions::default();
        assert!(apply_field(&mut options, ScanField::Width, " 210.5 "));
        assert!(apply_field(&mut options, ScanField::Top, "0"));
        assert_eq!(options.width, 210.5);
        assert_eq!(options.top, 0.0);
    }

    #[test]
    fn rejects_bad_input_and_keeps_value() {
        let mut options = ScanOptions::default();
        assert!(!apply_field(&mut options, ScanField::Height, "tall"));
        assert!(!apply_field(&mut options, ScanField::Left, "-3"));
        assert!(!apply_field(&mut options, ScanField::Dpi, "0"));
        assert!(!apply_field(&mut options, ScanField::Mode, "  "));
        assert_eq!(options, ScanOptions::default());
    }

    #[test]
    fn dpi_and_mode_update() {
        let mut options = ScanOptions::default();
        assert!(apply_field(&mut options, ScanField::Dpi, "300"));
        assert!(apply_field(&mut options, ScanField::Mode, "CGRAY"));
        assert_eq!(options.dpi, 300);
        assert_eq!(field_value(&options, ScanField::Dpi), "300");
    }
}
