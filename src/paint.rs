use crate::constants::{LABEL_FONT_FAMILY, PATH_CACHE_MAX};
use crate::input::{cover_fit, CoverFit};
use fnv::FnvHashMap;
use glam::Vec2;
use map_core::{DrawItem, QuadCurve, Rgba, Scene, TextAlign};
use std::f64::consts::TAU;
use wasm_bindgen::JsValue;
use web_sys as web;

#[inline]
fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

type PathKey = [u32; 6];

fn path_key(c: &QuadCurve) -> PathKey {
    [
        c.p0.x.to_bits(),
        c.p0.y.to_bits(),
        c.control.x.to_bits(),
        c.control.y.to_bits(),
        c.p1.x.to_bits(),
        c.p1.y.to_bits(),
    ]
}

/// Canvas 2D back end for composed scenes.
pub struct Painter {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    background: Option<web::HtmlImageElement>,
    paths: FnvHashMap<PathKey, web::Path2d>,
    fit: CoverFit,
}

impl Painter {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = crate::dom::context_2d(&canvas)?;
        Ok(Self {
            canvas,
            ctx,
            background: None,
            paths: FnvHashMap::default(),
            fit: CoverFit::IDENTITY,
        })
    }

    /// Last surface-to-CSS mapping used for painting; pointer input uses it
    /// to convert back into surface units.
    pub fn fit(&self) -> CoverFit {
        self.fit
    }

    pub fn set_background_src(&mut self, src: &str) -> anyhow::Result<()> {
        let img = web::HtmlImageElement::new().map_err(js_err)?;
        img.set_src(src);
        self.background = Some(img);
        Ok(())
    }

    pub fn paint(&mut self, scene: &Scene) -> anyhow::Result<()> {
        let (css_w, css_h) = crate::dom::sync_canvas_backing_size(&self.canvas);
        let dpr = if css_w > 0.0 {
            self.canvas.width() as f64 / css_w
        } else {
            1.0
        };
        self.fit = cover_fit(
            Vec2::new(css_w as f32, css_h as f32),
            scene.size.as_vec2(),
        );

        let ctx = &self.ctx;
        ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)
            .map_err(js_err)?;
        ctx.clear_rect(0.0, 0.0, css_w, css_h);
        ctx.translate(self.fit.offset.x as f64, self.fit.offset.y as f64)
            .map_err(js_err)?;
        let s = self.fit.scale as f64;
        ctx.scale(s, s).map_err(js_err)?;

        // Two tiles cover any wrapped pan.
        let width = scene.size.width as f64;
        for tile_x in [-(scene.pan_x as f64), width - scene.pan_x as f64] {
            self.ctx.save();
            self.ctx.translate(tile_x, 0.0).map_err(js_err)?;
            for layer in &scene.layers {
                for item in &layer.items {
                    self.draw(item)?;
                }
            }
            self.ctx.restore();
        }

        if self.paths.len() > PATH_CACHE_MAX {
            self.paths.clear();
        }
        Ok(())
    }

    fn path_for(&mut self, curve: &QuadCurve) -> anyhow::Result<web::Path2d> {
        let key = path_key(curve);
        if let Some(p) = self.paths.get(&key) {
            return Ok(p.clone());
        }
        let p = web::Path2d::new_with_path_string(&curve.to_svg_path()).map_err(js_err)?;
        self.paths.insert(key, p.clone());
        Ok(p)
    }

    fn draw(&mut self, item: &DrawItem) -> anyhow::Result<()> {
        match item {
            DrawItem::Image { size } => {
                if let Some(img) = &self.background {
                    if img.complete() && img.natural_width() > 0 {
                        self.ctx
                            .draw_image_with_html_image_element_and_dw_and_dh(
                                img,
                                0.0,
                                0.0,
                                size.x as f64,
                                size.y as f64,
                            )
                            .map_err(js_err)?;
                    }
                }
            }
            DrawItem::Curve {
                curve,
                color,
                width,
                glow,
            } => {
                let path = self.path_for(curve)?;
                let ctx = &self.ctx;
                ctx.save();
                set_glow(ctx, *glow, color);
                ctx.set_stroke_style_str(&color.to_css());
                ctx.set_line_width(*width as f64);
                ctx.set_line_cap("round");
                ctx.stroke_with_path(&path);
                ctx.restore();
            }
            DrawItem::Circle {
                center,
                radius,
                fill,
                stroke,
                glow,
            } => {
                if *radius <= 0.0 {
                    return Ok(());
                }
                let ctx = &self.ctx;
                ctx.save();
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)
                    .map_err(js_err)?;
                if let Some(f) = fill {
                    set_glow(ctx, *glow, f);
                    ctx.set_fill_style_str(&f.to_css());
                    ctx.fill();
                }
                if let Some((c, w)) = stroke {
                    ctx.set_shadow_blur(0.0);
                    ctx.set_stroke_style_str(&c.to_css());
                    ctx.set_line_width(*w as f64);
                    ctx.stroke();
                }
                ctx.restore();
            }
            DrawItem::Line {
                from,
                to,
                color,
                width,
            } => {
                let ctx = &self.ctx;
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.set_stroke_style_str(&color.to_css());
                ctx.set_line_width(*width as f64);
                ctx.stroke();
            }
            DrawItem::Wedge {
                center,
                radius,
                start_angle,
                end_angle,
                color,
            } => {
                let ctx = &self.ctx;
                ctx.begin_path();
                ctx.move_to(center.x as f64, center.y as f64);
                ctx.arc(
                    center.x as f64,
                    center.y as f64,
                    *radius as f64,
                    *start_angle as f64,
                    *end_angle as f64,
                )
                .map_err(js_err)?;
                ctx.close_path();
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill();
            }
            DrawItem::Text {
                pos,
                text,
                color,
                size,
                align,
            } => {
                let ctx = &self.ctx;
                ctx.set_font(&format!("{size}px {LABEL_FONT_FAMILY}"));
                ctx.set_text_align(match align {
                    TextAlign::Left => "left",
                    TextAlign::Center => "center",
                });
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill_text(text, pos.x as f64, pos.y as f64)
                    .map_err(js_err)?;
            }
        }
        Ok(())
    }
}

#[inline]
fn set_glow(ctx: &web::CanvasRenderingContext2d, blur: f32, color: &Rgba) {
    if blur > 0.0 {
        ctx.set_shadow_blur(blur as f64);
        ctx.set_shadow_color(&color.with_alpha(1.0).to_css());
    } else {
        ctx.set_shadow_blur(0.0);
    }
}
