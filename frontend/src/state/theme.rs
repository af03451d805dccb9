//! Light/dark preference. The choice is kept in `localStorage` and mirrored
//! as the `dark` class on the document element.

use laundry_shared::theme::{ThemeMode, DARK_CLASS};
use yew::prelude::*;

use crate::services::storage::{load_theme, save_theme};

pub type ThemeContext = UseStateHandle<ThemeMode>;

#[derive(Properties, PartialEq)]
pub struct ThemeProviderProps {
    #[prop_or_default]
    pub children: Html,
}

#[function_component(ThemeProvider)]
pub fn theme_provider(props: &ThemeProviderProps) -> Html {
    let theme = use_state(load_theme);

    use_effect_with(*theme, |mode| {
        apply_theme(*mode);
        save_theme(*mode);
        || ()
    });

    html! {
        <ContextProvider<ThemeContext> context={theme}>
            { props.children.clone() }
        </ContextProvider<ThemeContext>>
    }
}

#[hook]
pub fn use_theme() -> ThemeContext {
    let fallback = use_state(ThemeMode::default);
    use_context::<ThemeContext>().unwrap_or(fallback)
}

fn apply_theme(mode: ThemeMode) {
    let Some(root) = gloo::utils::document().document_element() else {
        return;
    };
    if root
        .class_list()
        .toggle_with_force(DARK_CLASS, mode.is_dark())
        .is_err()
    {
        tracing::warn!("failed to toggle theme class");
    }
}
