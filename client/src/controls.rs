use imperil_shared::HexSize;
use imperil_shared::territory::{self, WORLD};
use imperil_shared::water::water_body_at;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::app::MapState;

const LABEL_STYLE: &str = "display: block; font-size: 0.75rem; font-weight: 600; text-transform: uppercase; letter-spacing: 0.04em; color: #6b7280; margin-bottom: 4px;";
const SELECT_STYLE: &str = "width: 100%; padding: 8px 10px; border: 1px solid #d1d5db; border-radius: 6px; background: #ffffff; color: #111827; font-size: 0.9rem;";
const BUTTON_STYLE: &str = "width: 100%; padding: 9px 12px; border: none; border-radius: 6px; color: #ffffff; font-size: 0.9rem; font-weight: 600; cursor: pointer; transition: filter 0.15s ease;";

fn select_value(e: &leptos::ev::Event) -> Option<String> {
    let target = e.target()?;
    let select = target.dyn_into::<web_sys::HtmlSelectElement>().ok()?;
    Some(select.value())
}

fn hover_in(e: leptos::ev::MouseEvent) {
    if let Some(el) = e.target().and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok()) {
        el.style().set_property("filter", "brightness(1.1)").ok();
    }
}

fn hover_out(e: leptos::ev::MouseEvent) {
    if let Some(el) = e.target().and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok()) {
        el.style().remove_property("filter").ok();
    }
}

#[component]
pub fn ControlPanel() -> impl IntoView {
    view! {
        <aside style="flex: 0 1 300px; min-width: 260px; display: flex; flex-direction: column; gap: 16px; padding: 20px; background: #ffffff; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,0.12);">
            <TerritorySelect />
            <HexSizeSelect />
            <RandomizeButton />
            <HexToggle />
            <ViewReadout />
            <HexDetails />
        </aside>
    }
}

#[component]
fn TerritorySelect() -> impl IntoView {
    let MapState(view) = expect_context();

    let on_change = move |e: leptos::ev::Event| {
        let Some(name) = select_value(&e) else {
            return;
        };
        if name.is_empty() {
            return;
        }
        view.update(|v| {
            if let Err(err) = v.select_territory(&name) {
                tracing::warn!(error = %err, "territory selection rejected");
            }
        });
    };

    view! {
        <div>
            <label style=LABEL_STYLE for="territory-select">"Territory"</label>
            <select
                id="territory-select"
                style=SELECT_STYLE
                prop:value=move || view.with(|v| v.territory().unwrap_or_default().to_owned())
                on:change=on_change
            >
                <option value="" disabled=true>"Select Territory"</option>
                <option value=WORLD>{WORLD}</option>
                {territory::by_continent()
                    .into_iter()
                    .map(|(continent, members)| {
                        view! {
                            <optgroup label=continent.label()>
                                {members
                                    .into_iter()
                                    .map(|t| view! { <option value=t.name>{t.name}</option> })
                                    .collect::<Vec<_>>()}
                            </optgroup>
                        }
                    })
                    .collect::<Vec<_>>()}
            </select>
        </div>
    }
}

#[component]
fn HexSizeSelect() -> impl IntoView {
    let MapState(view) = expect_context();

    let on_change = move |e: leptos::ev::Event| {
        let Some(size) = select_value(&e).as_deref().and_then(HexSize::from_key) else {
            return;
        };
        view.update(|v| v.set_hex_size(size));
    };

    view! {
        <div>
            <label style=LABEL_STYLE for="hex-size-select">"Hex Size"</label>
            <select
                id="hex-size-select"
                style=SELECT_STYLE
                prop:value=move || view.with(|v| v.hex_size().key())
                on:change=on_change
            >
                {HexSize::ALL
                    .iter()
                    .map(|size| view! { <option value=size.key()>{size.label()}</option> })
                    .collect::<Vec<_>>()}
            </select>
        </div>
    }
}

#[component]
fn RandomizeButton() -> impl IntoView {
    let MapState(view) = expect_context();

    view! {
        <button
            style=format!("{BUTTON_STYLE} background: #6366f1;")
            on:click=move |_| view.update(|v| v.randomize(&mut rand::thread_rng()))
            on:mouseenter=hover_in
            on:mouseleave=hover_out
        >
            "Randomize Coordinates"
        </button>
    }
}

#[component]
fn HexToggle() -> impl IntoView {
    let MapState(view) = expect_context();
    let shown = move || view.with(|v| v.show_hexes());

    view! {
        <button
            style=move || {
                let bg = if shown() { "#4b5563" } else { "#10b981" };
                format!("{BUTTON_STYLE} background: {bg};")
            }
            on:click=move |_| view.update(|v| v.toggle_hexes())
            on:mouseenter=hover_in
            on:mouseleave=hover_out
        >
            {move || if shown() { "Hide Hexes" } else { "Show Hexes" }}
        </button>
    }
}

#[component]
fn ViewReadout() -> impl IntoView {
    let MapState(view) = expect_context();

    let summary = move || {
        view.with(|v| {
            let c = v.center();
            format!(
                "{:.4}, {:.4} \u{00B7} zoom {} \u{00B7} res {}",
                c.lat,
                c.lng,
                v.zoom(),
                v.overlay().resolution
            )
        })
    };

    view! {
        <div>
            <span style=LABEL_STYLE>"View"</span>
            <div style="font-family: 'JetBrains Mono', monospace; font-size: 0.8rem; color: #374151;">
                {summary}
            </div>
        </div>
    }
}

#[component]
fn HexDetails() -> impl IntoView {
    let MapState(view) = expect_context();

    let details = move || {
        view.with(|v| {
            v.selected_hex().map(|cell| {
                let water_body = water_body_at(cell.centroid).map(|w| w.name).unwrap_or("-");
                vec![
                    ("Hex", cell.label.clone()),
                    ("Terrain", cell.terrain.label().to_owned()),
                    ("Water Body", water_body.to_owned()),
                    (
                        "Centroid",
                        format!("{:.4}, {:.4}", cell.centroid.lat, cell.centroid.lng),
                    ),
                    ("Ring", cell.ring.to_string()),
                    ("Cell", cell.id.clone()),
                ]
            })
        })
    };

    view! {
        <div style="border-top: 1px solid #e5e7eb; padding-top: 12px;">
            <span style=LABEL_STYLE>"Selected Hex"</span>
            {move || match details() {
                Some(rows) => view! {
                    <dl style="display: grid; grid-template-columns: auto 1fr; gap: 4px 12px; margin: 0; font-size: 0.85rem;">
                        {rows
                            .into_iter()
                            .map(|(name, value)| {
                                view! {
                                    <dt style="color: #6b7280;">{name}</dt>
                                    <dd style="margin: 0; font-family: 'JetBrains Mono', monospace; word-break: break-all;">{value}</dd>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </dl>
                    <button
                        style="margin-top: 8px; padding: 4px 10px; border: 1px solid #d1d5db; border-radius: 4px; background: #ffffff; color: #374151; font-size: 0.8rem; cursor: pointer;"
                        on:click=move |_| view.update(|v| v.clear_selection())
                    >
                        "Clear"
                    </button>
                }
                .into_any(),
                None => view! {
                    <p style="margin: 0; font-size: 0.85rem; color: #6b7280;">
                        "Show hexes and click one on the map to inspect it."
                    </p>
                }
                .into_any(),
            }}
        </div>
    }
}
