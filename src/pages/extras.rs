//! Page Extras
//!
//! Delete confirmations, image previews and the inspection month picker.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlImageElement, HtmlInputElement, Url};

use crate::dom;

pub const DELETE_LINKS: &str = "a.text-danger";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this?";

/// Ask before following a delete link
fn bind_delete_confirm(root: &Element) -> usize {
    let links = dom::query_all(root, DELETE_LINKS);
    for link in &links {
        let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
            if !dom::confirm(DELETE_PROMPT) {
                ev.prevent_default();
            }
        });
        let _ = link.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
        on_click.forget();
    }
    links.len()
}

fn object_urls(input: &HtmlInputElement) -> Vec<String> {
    let Some(files) = input.files() else {
        return Vec::new();
    };
    (0..files.length())
        .filter_map(|i| files.get(i))
        .filter(|file| file.type_().starts_with("image/"))
        .filter_map(|file| Url::create_object_url_with_blob(&file).ok())
        .collect()
}

fn on_files(input: &HtmlInputElement, mut handler: impl FnMut(Vec<String>) + 'static) {
    let source = input.clone();
    let on_change = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| handler(object_urls(&source)));
    let _ = input.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref());
    on_change.forget();
}

/// Single profile picture shown in `#profilePreview`
fn bind_profile_preview(document: &Document) -> bool {
    let (Some(input), Some(preview)) = (
        dom::by_id::<HtmlInputElement>(document, "id_profile_picture"),
        dom::by_id::<HtmlImageElement>(document, "profilePreview"),
    ) else {
        return false;
    };
    on_files(&input, move |urls| {
        if let Some(url) = urls.into_iter().next() {
            preview.set_src(&url);
            dom::set_display(&preview, "block");
        }
    });
    true
}

/// Thumbnails of every chosen car image in `#galleryPreview`
fn bind_gallery_preview(document: &Document) -> bool {
    let (Some(input), Some(gallery)) = (
        dom::by_id::<HtmlInputElement>(document, "carImageInput"),
        document.get_element_by_id("galleryPreview"),
    ) else {
        return false;
    };
    let doc = document.clone();
    on_files(&input, move |urls| {
        gallery.set_inner_html("");
        for url in urls {
            let Some(img) = doc.create_element("img").ok().and_then(|el| el.dyn_into::<HtmlImageElement>().ok()) else {
                continue;
            };
            img.set_src(&url);
            img.set_class_name("img-thumbnail m-1");
            img.set_width(120);
            let _ = gallery.append_child(&img);
        }
    });
    true
}

const MONTHS: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

/// `YYYY-MM-DD` (or `YYYY-MM`) as `Mon YYYY`
pub fn month_label(iso: &str) -> Option<String> {
    let mut parts = iso.trim().split('-');
    let year = parts.next().filter(|y| y.len() == 4)?.parse::<u32>().ok()?;
    let month = parts.next()?.parse::<usize>().ok()?;
    if let Some(day) = parts.next() {
        if !matches!(day.parse::<u32>(), Ok(1..=31)) {
            return None;
        }
    }
    if parts.next().is_some() {
        return None;
    }
    let name = MONTHS.get(month.checked_sub(1)?)?;
    Some(format!("{} {}", name, year))
}

/// Clicking `#date-cell` opens the hidden `#hidden-date` picker; the chosen
/// month replaces the cell's leading text
fn bind_date_cell(document: &Document) -> bool {
    let (Some(cell), Some(picker)) = (
        document.get_element_by_id("date-cell"),
        dom::by_id::<HtmlInputElement>(document, "hidden-date"),
    ) else {
        return false;
    };

    let opener = picker.clone();
    let on_open = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| opener.click());
    let _ = cell.add_event_listener_with_callback("click", on_open.as_ref().unchecked_ref());
    on_open.forget();

    let source = picker.clone();
    let on_change = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
        let Some(label) = month_label(&source.value()) else {
            log::warn!("[EXTRAS] Ignoring date {:?}", source.value());
            return;
        };
        let text = format!("{} ", label);
        match cell.first_child() {
            Some(node) => node.set_node_value(Some(&text)),
            None => cell.set_text_content(Some(&text)),
        }
    });
    let _ = picker.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref());
    on_change.forget();
    true
}

pub fn init_extras(document: &Document) {
    let deletes = document.document_element().map(|root| bind_delete_confirm(&root)).unwrap_or(0);
    let profile = bind_profile_preview(document);
    let gallery = bind_gallery_preview(document);
    let date = bind_date_cell(document);
    log::debug!(
        "[EXTRAS] delete links={}, profile preview={}, gallery preview={}, month picker={}",
        deletes,
        profile,
        gallery,
        date
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_prompt_text() {
        assert_eq!(DELETE_PROMPT, "Are you sure you want to delete this?");
    }

    #[test]
    fn test_month_label_from_picker_value() {
        assert_eq!(month_label("2024-03-15").as_deref(), Some("Mar 2024"));
        assert_eq!(month_label("2023-12-01").as_deref(), Some("Dec 2023"));
        assert_eq!(month_label("2025-01").as_deref(), Some("Jan 2025"));
    }

    #[test]
    fn test_month_label_rejects_bad_input() {
        for bad in ["", "2024", "2024-13-01", "2024-00-10", "2024-02-40", "24-02-01", "2024-02-01-09", "March"] {
            assert_eq!(month_label(bad), None, "{}", bad);
        }
    }
}
