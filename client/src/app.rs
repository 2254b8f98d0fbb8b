use imperil_shared::MapView;
use leptos::prelude::*;

use crate::canvas::MapCanvas;
use crate::config;
use crate::controls::ControlPanel;

/// Page-wide map state. Wrapped so the context lookup is unambiguous.
#[derive(Clone, Copy)]
pub(crate) struct MapState(pub RwSignal<MapView>);

/// Build the initial view from the page query.
fn initial_view() -> MapView {
    let mut view = MapView::new(config::overlay_config());
    view.set_hex_size(config::initial_hex_size());
    if let Some(name) = config::initial_territory()
        && let Err(e) = view.select_territory(&name)
    {
        tracing::warn!(error = %e, "ignoring territory from query");
    }
    view.set_show_hexes(config::show_hexes_on_start());
    view
}

#[component]
pub fn App() -> impl IntoView {
    let view = RwSignal::new(initial_view());
    provide_context(MapState(view));

    view! {
        <div style="min-height: 100vh; background: #f3f4f6; color: #111827; font-family: 'Inter', system-ui, sans-serif;">
            <header style="padding: 24px 32px 8px;">
                <h1 style="margin: 0; font-size: 1.9rem; font-weight: 700;">"Imperil: World Domination"</h1>
                <p style="margin: 8px 0 0; max-width: 720px; color: #4b5563; line-height: 1.5;">
                    "Pick a territory or jump somewhere random, then lay a hexagonal grid over the map. "
                    "Land hexes are solid, water hexes are dashed. Click a hex to inspect it."
                </p>
            </header>
            <main style="display: flex; flex-wrap: wrap; gap: 24px; padding: 16px 32px 32px; align-items: flex-start;">
                <ControlPanel />
                <section style="flex: 1 1 640px; min-width: 320px; height: 640px; background: #ffffff; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,0.12);">
                    <MapCanvas />
                </section>
            </main>
        </div>
    }
}
