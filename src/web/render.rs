//! Canvas drawing and DOM overlays (HUD, start / game-over card, footer).

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement};

use crate::fruit::Fruit;
use crate::session::Session;
use crate::storage::HighScoreStore;

const FONT_STACK: &str = "Inter, system-ui, -apple-system, 'Segoe UI', Roboto, 'Helvetica Neue', Arial";

/// Handles to the DOM nodes we update every frame.
pub struct Overlays {
    pub hud: Element,
    hud_subtitle: Element,
    hud_score: Element,
    hud_high: Element,
    pub card: HtmlElement,
    card_title: Element,
    card_body: Element,
    card_stats: Element,
    pub button: HtmlElement,
    pub footer: Element,
    body: HtmlElement,
    prev_body_style: Option<String>, // restored on remove
}

fn div(doc: &Document, style: &str, text: &str) -> Result<Element, JsValue> {
    let el = doc.create_element("div")?;
    el.set_attribute("style", style)?;
    el.set_text_content(Some(text));
    Ok(el)
}

/// Reuse a host-provided `#tf-canvas` or create one. The flag is true when the
/// canvas was created here and must be removed again on teardown.
pub fn ensure_canvas(doc: &Document) -> Result<(HtmlCanvasElement, bool), JsValue> {
    if let Some(el) = doc.get_element_by_id("tf-canvas") {
        return Ok((el.dyn_into()?, false));
    }
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
    c.set_id("tf-canvas");
    c.set_attribute(
        "style",
        "position:fixed; left:50%; top:52%; transform:translate(-50%,-50%); width:min(92vw,520px); height:60vh; border-radius:14px; box-shadow:0 10px 30px rgba(12,30,40,0.06); touch-action:none; user-select:none; z-index:20;",
    )?;
    body.append_child(&c)?;
    Ok((c, true))
}

pub fn ensure_overlays(doc: &Document) -> Result<Overlays, JsValue> {
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let prev_body_style = body.get_attribute("style");
    body.set_attribute(
        "style",
        &format!("margin:0; padding:0; min-height:100vh; font-family:{FONT_STACK}; background:linear-gradient(180deg,#fff8f4,#fff);"),
    )?;

    // Header: title + countdown on the left, score + high score on the right.
    let hud = div(
        doc,
        "position:fixed; top:0; left:0; right:0; display:flex; justify-content:space-between; align-items:center; padding:14px 16px; border-bottom:1px solid rgba(0,0,0,0.06); z-index:40;",
        "",
    )?;
    hud.set_id("tf-hud");
    let left = div(doc, "text-align:left;", "")?;
    let title = div(doc, "font-size:18px; font-weight:700;", "Tap to Catch Fruits")?;
    left.append_child(&title)?;
    let hud_subtitle = div(doc, "font-size:12px; color:#666;", "")?;
    left.append_child(&hud_subtitle)?;
    let right = div(doc, "text-align:right;", "")?;
    let hud_score = div(doc, "font-size:18px; font-weight:700;", "0")?;
    let hud_high = div(doc, "font-size:12px; color:#666;", "")?;
    right.append_child(&hud_score)?;
    right.append_child(&hud_high)?;
    hud.append_child(&left)?;
    hud.append_child(&right)?;
    body.append_child(&hud)?;

    // Centre card shared by the "Ready?" and "Time's up!" states.
    let card: HtmlElement = div(
        doc,
        "position:fixed; left:50%; top:52%; transform:translate(-50%,-50%); background:white; padding:18px; border-radius:12px; text-align:center; width:min(74vw,420px); box-shadow:0 6px 18px rgba(0,0,0,0.08); z-index:50;",
        "",
    )?
    .dyn_into()?;
    card.set_id("tf-card");
    let card_title = div(doc, "font-size:20px; font-weight:800; margin-bottom:8px;", "")?;
    let card_body = div(doc, "font-size:14px; color:#444; margin-bottom:12px;", "")?;
    let card_stats = div(doc, "font-size:14px; color:#666;", "")?;
    let button: HtmlElement = doc.create_element("button")?.dyn_into()?;
    button.set_id("tf-start");
    button.set_attribute(
        "style",
        "background:#ff6b35; color:white; border:none; padding:10px 18px; border-radius:10px; font-weight:700; cursor:pointer; margin-top:6px;",
    )?;
    let hint = div(doc, "font-size:12px; color:#777; margin-top:10px;", "Tap anywhere to catch fruits")?;
    card.append_child(&card_title)?;
    card.append_child(&card_body)?;
    card.append_child(&card_stats)?;
    card.append_child(&button)?;
    card.append_child(&hint)?;
    body.append_child(&card)?;

    let footer = div(
        doc,
        "position:fixed; bottom:0; left:0; right:0; padding:12px; text-align:center; font-size:12px; color:#666; z-index:40;",
        "Tap fruits quickly — different fruits give different points",
    )?;
    footer.set_id("tf-footer");
    body.append_child(&footer)?;

    Ok(Overlays {
        hud,
        hud_subtitle,
        hud_score,
        hud_high,
        card,
        card_title,
        card_body,
        card_stats,
        button,
        footer,
        body,
        prev_body_style,
    })
}

impl Overlays {
    pub fn update<S: HighScoreStore>(&self, session: &Session<S>) {
        self.hud_subtitle
            .set_text_content(Some(&format!("Tap fruits to score — {}s", session.time_left())));
        self.hud_score.set_text_content(Some(&session.score().to_string()));
        self.hud_high
            .set_text_content(Some(&format!("High {}", session.high_score())));

        let style = self.card.style();
        if session.is_running() {
            let _ = style.set_property("display", "none");
            return;
        }
        let _ = style.set_property("display", "block");
        if session.is_over() {
            self.card_title.set_text_content(Some("Time's up!"));
            self.card_body.set_text_content(Some(&format!("Score: {}", session.score())));
            self.card_stats
                .set_text_content(Some(&format!("High: {}", session.high_score())));
            self.button.set_text_content(Some("Play again"));
        } else {
            self.card_title.set_text_content(Some("Ready?"));
            self.card_body.set_text_content(Some(&format!(
                "Catch as many fruits as you can in {}s",
                session.config().round_secs
            )));
            self.card_stats.set_text_content(None);
            self.button.set_text_content(Some("Start"));
        }
    }

    pub fn remove(&self) {
        self.hud.remove();
        self.card.remove();
        self.footer.remove();
        let _ = match &self.prev_body_style {
            Some(style) => self.body.set_attribute("style", style),
            None => self.body.remove_attribute("style"),
        };
    }
}

/// Keep the canvas backing store in step with its CSS size so pixel sizes and
/// hit boxes agree.
pub fn sync_canvas_size(canvas: &HtmlCanvasElement) {
    let w = canvas.client_width().max(1) as u32;
    let h = canvas.client_height().max(1) as u32;
    if canvas.width() != w {
        canvas.set_width(w);
    }
    if canvas.height() != h {
        canvas.set_height(h);
    }
}

pub fn draw<S: HighScoreStore>(
    ctx: &CanvasRenderingContext2d,
    canvas: &HtmlCanvasElement,
    session: &Session<S>,
) {
    sync_canvas_size(canvas);
    let w = canvas.width() as f64;
    let h = canvas.height() as f64;

    let bg = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
    let _ = bg.add_color_stop(0.0, "#e8fdf0");
    let _ = bg.add_color_stop(1.0, "#ffffff");
    ctx.set_fill_style_canvas_gradient(&bg);
    ctx.fill_rect(0.0, 0.0, w, h);

    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    for f in session.fruits() {
        draw_fruit(ctx, f, w, h);
    }
}

fn draw_fruit(ctx: &CanvasRenderingContext2d, f: &Fruit, w: f64, h: f64) {
    let cx = f.x / 100.0 * w;
    let cy = f.y / 100.0 * h;
    let half = f.size / 2.0;

    ctx.save();
    ctx.set_shadow_color("rgba(0,0,0,0.12)");
    ctx.set_shadow_blur(12.0);
    ctx.set_shadow_offset_y(6.0);
    ctx.set_fill_style_str("rgba(255,255,255,0.8)");
    rounded_rect(ctx, cx - half, cy - half, f.size, f.size, 12.0_f64.min(half));
    ctx.fill();
    ctx.restore();

    ctx.set_font(&format!("{}px {FONT_STACK}", (f.size * 0.6).max(24.0)));
    ctx.set_fill_style_str("#000");
    let _ = ctx.fill_text(f.kind.glyph, cx, cy);
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
    ctx.begin_path();
    ctx.move_to(x + r, y);
    let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
    let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
    let _ = ctx.arc_to(x, y + h, x, y, r);
    let _ = ctx.arc_to(x, y, x + w, y, r);
    ctx.close_path();
}
