// DOM helpers shared by the components

use web_sys::{DomRect, Storage, TouchEvent};

use crate::model::Contact;

pub fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Active touches of the event, in pixels relative to `rect`.
pub fn touch_contacts(e: &TouchEvent, rect: &DomRect) -> Vec<Contact> {
    let touches = e.touches();
    (0..touches.length())
        .filter_map(|i| touches.item(i))
        .map(|t| {
            Contact::new(
                t.identifier(),
                (t.client_x() as f64 - rect.left()) as f32,
                (t.client_y() as f64 - rect.top()) as f32,
            )
        })
        .collect()
}
