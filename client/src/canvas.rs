use std::cell::{Cell, RefCell};
use std::rc::Rc;

use imperil_shared::config::{
    REFERENCE_VIEWPORT_PX, TILE_ATTRIBUTION, TILE_ATTRIBUTION_URL, TILE_SIZE, TILE_SUBDOMAINS,
    TILE_URL,
};
use imperil_shared::geo::point_in_polygon;
use imperil_shared::{HexCell, HexStyle, MapView, hex_style};
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, PointerEvent, WheelEvent};

use crate::app::MapState;
use crate::colors::with_alpha;
use crate::render_loop::RenderScheduler;
use crate::tiles::{TILE_CACHE_CAPACITY, TileCache, request_tile};
use crate::viewport::Viewport;

/// Pointer travel below which a press counts as a click rather than a drag.
const CLICK_SLOP_PX: f64 = 5.0;
/// Accumulated wheel delta per zoom level; trackpads emit many small deltas.
const WHEEL_STEP: f64 = 100.0;
const BACKGROUND: &str = "#aad3df";
const PLACEHOLDER_TILE: &str = "#e5e7eb";

/// Pointer gesture over the map. A press starts a drag; moves pan by the
/// delta since the last event; release or cancel ends it.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(crate) struct DragState {
    active: bool,
    start: (f64, f64),
    last: (f64, f64),
}

impl DragState {
    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn press(&mut self, x: f64, y: f64) {
        *self = Self {
            active: true,
            start: (x, y),
            last: (x, y),
        };
    }

    /// Delta since the previous event, or `None` when no drag is running.
    pub(crate) fn moved(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        if !self.active {
            return None;
        }
        let delta = (x - self.last.0, y - self.last.1);
        self.last = (x, y);
        Some(delta)
    }

    /// Ends the drag. `Some(true)` when the pointer travelled far enough to
    /// count as a pan, `None` when no drag was running.
    pub(crate) fn release(&mut self, x: f64, y: f64) -> Option<bool> {
        if !self.active {
            return None;
        }
        self.active = false;
        Some(!self.is_click(x, y))
    }

    pub(crate) fn cancel(&mut self) {
        self.active = false;
    }

    /// Whether a point is still within click distance of the last press.
    pub(crate) fn is_click(&self, x: f64, y: f64) -> bool {
        (x - self.start.0).abs() < CLICK_SLOP_PX && (y - self.start.1).abs() < CLICK_SLOP_PX
    }
}

/// Topmost hex under the screen point. The selected hex is drawn last, so it
/// wins over its neighbours; the rest are tested in reverse draw order.
pub(crate) fn hit_test(
    vp: &Viewport,
    cells: &[HexCell],
    selected: Option<&str>,
    x: f64,
    y: f64,
) -> Option<String> {
    let contains = |cell: &HexCell| point_in_polygon((x, y), &vp.to_screen_ring(&cell.boundary));
    if let Some(id) = selected
        && let Some(cell) = cells.iter().find(|c| c.id == id)
        && contains(cell)
    {
        return Some(cell.id.clone());
    }
    cells.iter().rev().find(|c| contains(c)).map(|c| c.id.clone())
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

fn draw_tiles(
    ctx: &CanvasRenderingContext2d,
    vp: &Viewport,
    cache: &Rc<RefCell<TileCache>>,
    on_ready: &Rc<dyn Fn()>,
) {
    for slot in vp.visible_tiles() {
        let image = cache.borrow().get(slot.key).cloned();
        match image {
            Some(img) => {
                ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    &img,
                    slot.screen_x,
                    slot.screen_y,
                    TILE_SIZE,
                    TILE_SIZE,
                )
                .ok();
            }
            None => {
                ctx.set_fill_style_str(PLACEHOLDER_TILE);
                ctx.fill_rect(slot.screen_x, slot.screen_y, TILE_SIZE, TILE_SIZE);
                request_tile(cache, TILE_URL, TILE_SUBDOMAINS, slot.key, on_ready.clone());
            }
        }
    }
}

fn draw_hex(ctx: &CanvasRenderingContext2d, ring: &[(f64, f64)], style: &HexStyle) {
    let Some(&(x0, y0)) = ring.first() else {
        return;
    };
    ctx.begin_path();
    ctx.move_to(x0, y0);
    for &(x, y) in &ring[1..] {
        ctx.line_to(x, y);
    }
    ctx.close_path();

    ctx.set_fill_style_str(&with_alpha(style.fill_color, style.fill_opacity));
    ctx.fill();

    let dash = js_sys::Array::new();
    for segment in style.dash_segments() {
        dash.push(&segment.into());
    }
    ctx.set_line_dash(&dash).ok();
    ctx.set_line_width(style.weight);
    ctx.set_stroke_style_str(&with_alpha(style.color, style.opacity));
    ctx.stroke();
}

fn draw_hexes(ctx: &CanvasRenderingContext2d, vp: &Viewport, view: &MapView) {
    let cells = view.visible_hexes();
    if cells.is_empty() {
        return;
    }
    ctx.set_line_join("round");
    for cell in cells.iter().filter(|c| !view.is_selected(&c.id)) {
        draw_hex(ctx, &vp.to_screen_ring(&cell.boundary), &hex_style(cell.terrain, false));
    }
    if let Some(cell) = cells.iter().find(|c| view.is_selected(&c.id)) {
        draw_hex(ctx, &vp.to_screen_ring(&cell.boundary), &hex_style(cell.terrain, true));
    }
    ctx.set_line_dash(&js_sys::Array::new()).ok();
}

fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, e: &MouseEvent) -> (f64, f64) {
    canvas_ref
        .get_untracked()
        .map(|el| {
            let rect = el.get_bounding_client_rect();
            (
                e.client_x() as f64 - rect.left(),
                e.client_y() as f64 - rect.top(),
            )
        })
        .unwrap_or((e.offset_x() as f64, e.offset_y() as f64))
}

fn reset_cursor(e: &PointerEvent) {
    if let Some(target) = e.target()
        && let Ok(el) = target.dyn_into::<web_sys::HtmlElement>()
    {
        el.style().set_property("cursor", "grab").ok();
    }
}

#[component]
pub fn MapCanvas() -> impl IntoView {
    let MapState(view) = expect_context();

    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    let (init_w, init_h) = REFERENCE_VIEWPORT_PX;
    let viewport = RwSignal::new(
        view.with_untracked(|v| Viewport::new(v.center(), v.zoom(), init_w, init_h)),
    );
    // Bumped whenever a tile image finishes loading.
    let tile_version = RwSignal::new(0u64);
    let tiles: Rc<RefCell<TileCache>> = Rc::new(RefCell::new(TileCache::new(TILE_CACHE_CAPACITY)));

    let drag = Rc::new(Cell::new(DragState::default()));
    let wheel_accum = Rc::new(Cell::new(0.0f64));

    let on_tile_ready: Rc<dyn Fn()> = Rc::new(move || tile_version.update(|n| *n += 1));
    let tiles_render = tiles.clone();
    let scheduler = RenderScheduler::new(move || {
        let Some(canvas) = canvas_ref.get_untracked() else {
            return;
        };
        let canvas: &HtmlCanvasElement = &canvas;
        let Some(parent) = canvas.parent_element() else {
            return;
        };
        let w = parent.client_width() as f64;
        let h = parent.client_height() as f64;
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0)
            .max(1.0);
        let pw = (w * dpr).round() as u32;
        let ph = (h * dpr).round() as u32;
        if canvas.width() != pw || canvas.height() != ph {
            canvas.set_width(pw);
            canvas.set_height(ph);
        }
        let Some(ctx) = context_2d(canvas) else {
            return;
        };
        ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0).ok();

        viewport.update_untracked(|vp| vp.resize(w, h));
        let vp = viewport.get_untracked();

        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, w, h);
        draw_tiles(&ctx, &vp, &tiles_render, &on_tile_ready);
        view.with_untracked(|v| draw_hexes(&ctx, &vp, v));
    });
    let scheduler = Rc::new(scheduler);

    // View state drives the viewport; a drag in progress owns it until release.
    let drag_sync = drag.clone();
    Effect::new(move || {
        let (center, zoom) = view.with(|v| (v.center(), v.zoom()));
        if drag_sync.get().is_active() {
            return;
        }
        viewport.update(|vp| {
            vp.center = center;
            vp.zoom = zoom;
        });
    });

    let sched_repaint = scheduler.clone();
    Effect::new(move || {
        view.track();
        viewport.track();
        tile_version.track();
        sched_repaint.mark_dirty();
    });

    let sched_resize = scheduler.clone();
    let _resize = window_event_listener(leptos::ev::resize, move |_| sched_resize.mark_dirty());

    // --- Input handlers ---

    let on_wheel = {
        let wheel_accum = wheel_accum.clone();
        move |e: WheelEvent| {
            e.prevent_default();
            let accum = wheel_accum.get() + e.delta_y();
            if accum.abs() < WHEEL_STEP {
                wheel_accum.set(accum);
                return;
            }
            wheel_accum.set(0.0);
            let zoom = view.with_untracked(|v| v.zoom());
            let next = if accum < 0.0 {
                zoom.saturating_add(1)
            } else {
                zoom.saturating_sub(1)
            };
            view.update(|v| v.set_zoom(next));
        }
    };

    let on_pointer_down = {
        let drag = drag.clone();
        move |e: PointerEvent| {
            let mut state = drag.get();
            state.press(e.client_x() as f64, e.client_y() as f64);
            drag.set(state);

            if let Some(target) = e.target()
                && let Ok(el) = target.dyn_into::<web_sys::HtmlElement>()
            {
                el.set_pointer_capture(e.pointer_id()).ok();
                el.style().set_property("cursor", "grabbing").ok();
            }
        }
    };

    let on_pointer_move = {
        let drag = drag.clone();
        move |e: PointerEvent| {
            let mut state = drag.get();
            let delta = state.moved(e.client_x() as f64, e.client_y() as f64);
            drag.set(state);
            if let Some((dx, dy)) = delta {
                viewport.update(|vp| vp.pan(dx, dy));
            }
        }
    };

    let on_pointer_up = {
        let drag = drag.clone();
        move |e: PointerEvent| {
            let mut state = drag.get();
            let released = state.release(e.client_x() as f64, e.client_y() as f64);
            drag.set(state);
            let Some(panned) = released else {
                return;
            };
            reset_cursor(&e);
            if panned {
                let center = viewport.with_untracked(|vp| vp.center);
                view.update(|v| v.set_center(center));
            }
        }
    };

    // The browser took over the gesture; snap back to the committed view.
    let on_pointer_cancel = {
        let drag = drag.clone();
        move |e: PointerEvent| {
            let mut state = drag.get();
            state.cancel();
            drag.set(state);
            reset_cursor(&e);
            let (center, zoom) = view.with_untracked(|v| (v.center(), v.zoom()));
            viewport.update(|vp| {
                vp.center = center;
                vp.zoom = zoom;
            });
        }
    };

    let on_click = {
        let drag = drag.clone();
        move |e: MouseEvent| {
            if !drag.get().is_click(e.client_x() as f64, e.client_y() as f64) {
                return;
            }
            let (x, y) = local_point(canvas_ref, &e);
            let vp = viewport.get_untracked();
            let hit = view.with_untracked(|v| hit_test(&vp, v.visible_hexes(), v.selected(), x, y));
            if let Some(id) = hit {
                view.update(|v| {
                    v.click_hex(&id);
                });
            }
        }
    };

    let hex_count = move || view.with(|v| v.hex_count());

    view! {
        <div
            style="position: relative; width: 100%; height: 100%; overflow: hidden; border-radius: 8px;"
            on:wheel=on_wheel
            on:pointerdown=on_pointer_down
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_up
            on:pointercancel=on_pointer_cancel
            on:click=on_click
        >
            <canvas
                node_ref=canvas_ref
                style="position: absolute; inset: 0; width: 100%; height: 100%; touch-action: none; cursor: grab;"
            />
            <div
                data-testid="debug-marker"
                style="position: absolute; top: 8px; right: 8px; padding: 4px 8px; background: rgba(17,24,39,0.75); color: #f9fafb; font-size: 12px; border-radius: 4px; pointer-events: none;"
            >
                {move || format!("Total hexes: {}", hex_count())}
            </div>
            <div style="position: absolute; bottom: 0; right: 0; padding: 2px 6px; background: rgba(255,255,255,0.8); color: #374151; font-size: 11px;">
                <a href=TILE_ATTRIBUTION_URL target="_blank" rel="noopener noreferrer" style="color: inherit;">
                    {TILE_ATTRIBUTION}
                </a>
            </div>
        </div>
    }
}
