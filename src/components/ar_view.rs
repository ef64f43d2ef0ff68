use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};
use yew::prelude::*;

use super::app::SharedController;
use crate::preview;
use crate::util::touch_contacts;

#[derive(Properties, PartialEq, Clone)]
pub struct ArViewProps {
    pub controller: SharedController,
    pub on_status: Callback<Option<String>>,
}

#[function_component(ArView)]
pub fn ar_view(props: &ArViewProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        let controller = props.controller.0.clone();
        let on_status = props.on_status.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window");
            let canvas: HtmlCanvasElement = canvas_ref.cast::<HtmlCanvasElement>().expect("canvas");
            let ctx: CanvasRenderingContext2d = canvas
                .get_context("2d")
                .ok()
                .flatten()
                .and_then(|c| c.dyn_into().ok())
                .expect("2d context");

            let compute_and_apply_canvas_size = {
                let canvas = canvas.clone();
                let window = window.clone();
                let controller = controller.clone();
                move || {
                    let width = window
                        .inner_width()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(800.0);
                    let height = window
                        .inner_height()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(600.0);
                    canvas.set_width(width.max(0.0) as u32);
                    canvas.set_height(height.max(0.0) as u32);
                    controller
                        .borrow_mut()
                        .session_mut()
                        .set_viewport(width as f32, height as f32);
                }
            };
            compute_and_apply_canvas_size();

            // Emits only when the text changed, so gestures don't re-render the app every move.
            let publish_status = {
                let controller = controller.clone();
                let last = Rc::new(RefCell::new(None::<String>));
                Rc::new(move || {
                    let current = controller.borrow().status().map(str::to_owned);
                    if *last.borrow() != current {
                        *last.borrow_mut() = current.clone();
                        on_status.emit(current);
                    }
                })
            };

            // RAF loop: reticle update from hit-test, then draw
            let raf_id = Rc::new(RefCell::new(None));
            let closure_cell: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> =
                Rc::new(RefCell::new(None));
            {
                let raf_id_clone = raf_id.clone();
                let closure_cell_clone = closure_cell.clone();
                let window_loop = window.clone();
                let canvas_loop = canvas.clone();
                let controller = controller.clone();
                *closure_cell.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
                    controller.borrow_mut().on_frame(timestamp);
                    {
                        let c = controller.borrow();
                        preview::draw(
                            &ctx,
                            canvas_loop.width() as f64,
                            canvas_loop.height() as f64,
                            c.session().camera(),
                            c.scene(),
                            c.active(),
                        );
                    }
                    if let Some(cb) = closure_cell_clone.borrow().as_ref() {
                        if let Ok(id) = window_loop.request_animation_frame(cb.as_ref().unchecked_ref()) {
                            *raf_id_clone.borrow_mut() = Some(id);
                        }
                    }
                })
                    as Box<dyn FnMut(f64)>));
                if let Some(cb) = closure_cell.borrow().as_ref() {
                    if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        *raf_id.borrow_mut() = Some(id);
                    }
                }
            }

            let resize_cb = {
                let compute_and_apply_canvas_size = compute_and_apply_canvas_size.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    compute_and_apply_canvas_size();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .ok();

            // Mouse aims the preview viewer ray; click is the select trigger (taps included)
            let mousemove_cb = {
                let controller = controller.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    controller
                        .borrow_mut()
                        .session_mut()
                        .set_aim(e.offset_x() as f32, e.offset_y() as f32);
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("mousemove", mousemove_cb.as_ref().unchecked_ref())
                .ok();
            let mouseleave_cb = {
                let controller = controller.clone();
                Closure::wrap(Box::new(move |_e: MouseEvent| {
                    controller.borrow_mut().session_mut().recenter_aim();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "mouseleave",
                    mouseleave_cb.as_ref().unchecked_ref(),
                )
                .ok();
            let click_cb = {
                let controller = controller.clone();
                let publish_status = publish_status.clone();
                Closure::wrap(Box::new(move |_e: MouseEvent| {
                    let result = controller.borrow_mut().select();
                    match result {
                        Ok(_) => publish_status(),
                        Err(err) => log::debug!("select ignored: {err}"),
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref())
                .ok();

            // Touch
            let touch_start_cb = {
                let canvas_tc = canvas.clone();
                let controller = controller.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let contacts = touch_contacts(&e, &canvas_tc.get_bounding_client_rect());
                    controller.borrow_mut().on_touch_start(&contacts);
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                )
                .ok();
            let touch_move_cb = {
                let canvas_tc = canvas.clone();
                let controller = controller.clone();
                let publish_status = publish_status.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let contacts = touch_contacts(&e, &canvas_tc.get_bounding_client_rect());
                    controller.borrow_mut().on_touch_move(&contacts);
                    publish_status();
                    e.prevent_default();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                )
                .ok();
            let touch_end_cb = {
                let controller = controller.clone();
                Closure::wrap(Box::new(move |_e: TouchEvent| {
                    controller.borrow_mut().on_touch_end();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref())
                .ok();
            canvas
                .add_event_listener_with_callback(
                    "touchcancel",
                    touch_end_cb.as_ref().unchecked_ref(),
                )
                .ok();

            // Cleanup
            let window_clone = window.clone();
            move || {
                let _ = window_clone.remove_event_listener_with_callback(
                    "resize",
                    resize_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "mouseleave",
                    mouseleave_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas
                    .remove_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref());
                let _ = canvas.remove_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchend",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchcancel",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                if let Some(id) = *raf_id.borrow() {
                    let _ = window_clone.cancel_animation_frame(id);
                }
                // break the self-reference so the frame closure can drop
                closure_cell.borrow_mut().take();
                let _keep_alive = (
                    &resize_cb,
                    &mousemove_cb,
                    &mouseleave_cb,
                    &click_cb,
                    &touch_start_cb,
                    &touch_move_cb,
                    &touch_end_cb,
                );
            }
        });
    }

    html! {
        <canvas ref={canvas_ref} id="ar-canvas" style="display:block; width:100%; height:100%; touch-action:none;"></canvas>
    }
}
