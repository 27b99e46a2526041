//! Custom Input Binder
//!
//! Shows a free-text input next to a select while the select holds the
//! `Other...` sentinel, hides and clears it otherwise.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, HtmlSelectElement};

use crate::descriptor::CUSTOM_SENTINEL;

/// What to do with the companion input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CustomInput {
    /// Show the input; `clear` drops any stale text
    Show { clear: bool },
    /// Hide the input and clear its value
    Hide,
}

impl CustomInput {
    pub fn is_visible(self) -> bool {
        matches!(self, CustomInput::Show { .. })
    }

    /// Apply to the current text of the input, returning the new text
    pub fn apply_to(self, current: &str) -> String {
        match self {
            CustomInput::Show { clear: false } => current.to_string(),
            CustomInput::Show { clear: true } | CustomInput::Hide => String::new(),
        }
    }
}

pub fn is_custom(value: &str) -> bool {
    value == CUSTOM_SENTINEL
}

/// Rule for a change event on the select
pub fn on_select_change(value: &str) -> CustomInput {
    if is_custom(value) {
        CustomInput::Show { clear: true }
    } else {
        CustomInput::Hide
    }
}

/// Rule evaluated once at bind time; keeps server-rendered custom text
pub fn on_bind(value: &str) -> CustomInput {
    if is_custom(value) {
        CustomInput::Show { clear: false }
    } else {
        CustomInput::Hide
    }
}

fn apply(input: &HtmlInputElement, rule: CustomInput, display: &str) {
    let style = input.style();
    let _ = style.set_property("display", if rule.is_visible() { display } else { "none" });
    input.set_value(&rule.apply_to(&input.value()));
}

/// Bind a select / input pair. `display` is the CSS display used when shown.
pub fn bind_custom_input(select: &HtmlSelectElement, input: &HtmlInputElement, display: &'static str) {
    apply(input, on_bind(&select.value()), display);

    let select_for_change = select.clone();
    let input_for_change = input.clone();
    let on_change = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
        apply(&input_for_change, on_select_change(&select_for_change.value()), display);
    });
    let _ = select.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref());
    on_change.forget();
}

/// Bind the pair found inside `scope` by selectors; no-op when either is missing
pub fn bind_pair_in(scope: &Element, select_selector: &str, input_selector: &str, display: &'static str) -> bool {
    let select = scope
        .query_selector(select_selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok());
    let input = scope
        .query_selector(input_selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());

    match (select, input) {
        (Some(select), Some(input)) => {
            bind_custom_input(&select, &input, display);
            true
        }
        _ => false,
    }
}

/// Bind every `tr` under `body` for each `(select, input)` selector pair.
/// Returns how many pairs were bound.
pub fn bind_rows(body: &Element, pairs: &[(&str, &str)], display: &'static str) -> usize {
    let Ok(rows) = body.query_selector_all("tr") else {
        return 0;
    };
    let mut bound = 0;
    for i in 0..rows.length() {
        let Some(row) = rows.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        for (select, input) in pairs {
            if bind_pair_in(&row, select, input, display) {
                bound += 1;
            }
        }
    }
    bound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_shows_empty_input() {
        let rule = on_select_change(CUSTOM_SENTINEL);
        assert!(rule.is_visible());
        assert_eq!(rule.apply_to("stale"), "");
    }

    #[test]
    fn test_other_value_hides_and_clears() {
        let rule = on_select_change("3");
        assert_eq!(rule, CustomInput::Hide);
        assert_eq!(rule.apply_to("typed"), "");
    }

    #[test]
    fn test_repeated_changes_are_idempotent() {
        let mut text = "typed".to_string();
        for _ in 0..3 {
            let rule = on_select_change("ok");
            text = rule.apply_to(&text);
            assert!(!rule.is_visible());
            assert_eq!(text, "");
        }
        for _ in 0..3 {
            let rule = on_select_change(CUSTOM_SENTINEL);
            text = rule.apply_to(&text);
            assert!(rule.is_visible());
            assert_eq!(text, "");
        }
    }

    #[test]
    fn test_bind_keeps_prerendered_custom_text() {
        let rule = on_bind(CUSTOM_SENTINEL);
        assert!(rule.is_visible());
        assert_eq!(rule.apply_to("Spare wheel"), "Spare wheel");
        assert_eq!(on_bind("1").apply_to("Spare wheel"), "");
    }
}
