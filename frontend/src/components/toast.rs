//! Transient notifications. Each toast dismisses itself after
//! [`TOAST_DURATION_MS`] or when clicked.

use std::rc::Rc;

use gloo::timers::callback::Timeout;
use yew::prelude::*;

pub const TOAST_DURATION_MS: u32 = 3_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    fn class(self) -> &'static str {
        match self {
            Self::Success => "toast toast-success",
            Self::Error => "toast toast-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

pub enum ToastAction {
    Push(ToastKind, String),
    Dismiss(u32),
}

#[derive(Debug, Default, PartialEq)]
pub struct ToastState {
    next_id: u32,
    toasts: Vec<Toast>,
}

impl Reducible for ToastState {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: ToastAction) -> Rc<Self> {
        let mut toasts = self.toasts.clone();
        let mut next_id = self.next_id;
        match action {
            ToastAction::Push(kind, message) => {
                toasts.push(Toast {
                    id: next_id,
                    kind,
                    message,
                });
                next_id = next_id.wrapping_add(1);
            }
            ToastAction::Dismiss(id) => toasts.retain(|toast| toast.id != id),
        }
        Rc::new(Self { next_id, toasts })
    }
}

/// Handle for raising toasts from anywhere under [`ToastProvider`].
#[derive(Clone, PartialEq)]
pub struct Toaster(UseReducerDispatcher<ToastState>);

impl Toaster {
    pub fn success(&self, message: impl Into<String>) {
        self.0.dispatch(ToastAction::Push(ToastKind::Success, message.into()));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.0.dispatch(ToastAction::Push(ToastKind::Error, message.into()));
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    #[prop_or_default]
    pub children: Html,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let state = use_reducer(ToastState::default);
    let toaster = Toaster(state.dispatcher());

    let on_dismiss = {
        let dispatcher = state.dispatcher();
        Callback::from(move |id: u32| dispatcher.dispatch(ToastAction::Dismiss(id)))
    };

    html! {
        <ContextProvider<Toaster> context={toaster}>
            { props.children.clone() }
            <div class="toast-container">
                { for state.toasts.iter().map(|toast| html! {
                    <ToastItem key={toast.id} toast={toast.clone()} on_dismiss={on_dismiss.clone()} />
                })}
            </div>
        </ContextProvider<Toaster>>
    }
}

#[hook]
pub fn use_toaster() -> Toaster {
    let fallback = use_reducer(ToastState::default);
    use_context::<Toaster>().unwrap_or_else(|| Toaster(fallback.dispatcher()))
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
    on_dismiss: Callback<u32>,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    let id = props.toast.id;

    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with(id, move |id| {
            let id = *id;
            let timeout = Timeout::new(TOAST_DURATION_MS, move || on_dismiss.emit(id));
            move || drop(timeout)
        });
    }

    let onclick = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(id))
    };

    html! {
        <div class={props.toast.kind.class()} role="status" {onclick}>
            { props.toast.message.clone() }
        </div>
    }
}
