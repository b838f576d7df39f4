use dioxus::prelude::*;
use dioxus_primitives::toast::{use_toast, ToastOptions, ToastProvider};
use tablero_core::{ActuatorKind, ActuatorState, ApiError, PanelApiClient, Reading};

use crate::config::resolve_api_base_url;
use crate::export::export_readings;
use crate::session::{self, SessionResolution};
use crate::token_store::TokenStore;
use crate::ui::{ButtonVariant, UiButton, UiInput, MOBILE_UI_STYLES};

#[derive(Clone, Copy, PartialEq, Eq)]
enum PanelView {
    Login,
    Control,
    Report,
}

const TOAST_STYLES: &str = r#"
.toast-container {
    position: fixed;
    inset: auto 12px 12px 12px;
    z-index: 9999;
    pointer-events: none;
}
.toast-list {
    margin: 0;
    padding: 0;
    list-style: none;
    display: flex;
    flex-direction: column;
    gap: 8px;
}
.toast {
    pointer-events: auto;
    border-radius: 10px;
    border: 1px solid #d1d5db;
    background: #ffffff;
    box-shadow: 0 10px 30px rgba(17, 24, 39, 0.12);
    padding: 10px 12px;
    color: #111827;
    display: flex;
    gap: 10px;
    align-items: flex-start;
}
.toast[data-type='success'] { border-color: #00cc66; }
.toast[data-type='error'] { border-color: #ff3b30; }
.toast[data-type='info'] { border-color: #007bff; }
.toast-content { flex: 1; }
.toast-title { font-size: 13px; font-weight: 700; }
.toast-description { font-size: 12px; color: #4b5563; margin-top: 2px; }
.toast-close {
    border: 0;
    background: transparent;
    color: #6b7280;
    font-size: 16px;
    line-height: 1;
    padding: 0;
}
"#;

#[component]
pub fn App() -> Element {
    rsx! {
        ToastProvider {
            AppShell {}
        }
    }
}

#[component]
fn AppShell() -> Element {
    let mut view = use_signal(|| PanelView::Login);
    // Inter-view token hand-off channel; consumed by the session gate.
    let mut nav_token = use_signal(|| None::<String>);
    let mut session_token = use_signal(|| None::<String>);
    let store = use_signal(TokenStore::for_platform);
    let api = use_signal(|| match PanelApiClient::new(resolve_api_base_url().base_url) {
        Ok(client) => Some(client),
        Err(error) => {
            tracing::error!("Failed to construct panel API client: {error}");
            None
        }
    });

    let mut username_input = use_signal(String::new);
    let mut password_input = use_signal(String::new);
    let mut login_error = use_signal(|| None::<String>);
    let mut logging_in = use_signal(|| false);

    let mut led_state = use_signal(|| ActuatorState::Off);
    let mut motor_state = use_signal(|| ActuatorState::Off);
    let mut command_pending = use_signal(|| false);
    let mut status_message = use_signal(|| None::<String>);
    let mut confirm_logout = use_signal(|| false);

    let mut readings = use_signal(Vec::<Reading>::new);
    let mut readings_loading = use_signal(|| false);
    let mut readings_error = use_signal(|| None::<String>);
    let mut fetched_at = use_signal(|| None::<String>);
    let mut export_notice = use_signal(|| None::<String>);

    let toasts = use_toast();

    // Session gate: runs on every entry into a protected view.
    use_future(move || async move {
        let current_view = view();
        if current_view == PanelView::Login {
            return;
        }

        let store_value = store.peek().clone();
        let handoff = nav_token.peek().clone();
        if handoff.is_some() {
            nav_token.set(None);
        }

        match session::resolve_session(&store_value, handoff).await {
            SessionResolution::Active(token) => {
                session_token.set(Some(token.clone()));

                if current_view == PanelView::Report {
                    let Some(client) = api.peek().clone() else {
                        readings_error.set(Some("API client is not ready.".to_string()));
                        return;
                    };
                    readings_loading.set(true);
                    readings_error.set(None);
                    match client.fetch_readings(&token).await {
                        Ok(records) => {
                            readings.set(records);
                            fetched_at
                                .set(Some(chrono::Local::now().format("%H:%M:%S").to_string()));
                        }
                        Err(ApiError::SessionExpired) => {
                            session::expire_session(&store_value).await;
                            session_token.set(None);
                            toasts.error(
                                "Session expired".to_string(),
                                ToastOptions::new().description("Sign in again to continue"),
                            );
                            view.set(PanelView::Login);
                        }
                        Err(error) => {
                            readings_error.set(Some(error.to_string()));
                        }
                    }
                    readings_loading.set(false);
                }
            }
            SessionResolution::Missing => {
                session_token.set(None);
                toasts.error(
                    "No active session".to_string(),
                    ToastOptions::new().description("Sign in to continue"),
                );
                view.set(PanelView::Login);
            }
        }
    });

    let on_login = move |_| {
        if logging_in() {
            return;
        }

        login_error.set(None);
        let username = username_input.peek().trim().to_string();
        let password = password_input.peek().trim().to_string();
        if username.is_empty() || password.is_empty() {
            login_error.set(Some("Enter a username and password.".to_string()));
            return;
        }
        let Some(client) = api.peek().clone() else {
            login_error.set(Some("API client is not ready.".to_string()));
            return;
        };

        logging_in.set(true);
        spawn(async move {
            match client.login(&username, &password).await {
                Ok(token) => {
                    password_input.set(String::new());
                    toasts.success(
                        "Signed in".to_string(),
                        ToastOptions::new().description("Session started"),
                    );
                    nav_token.set(Some(token));
                    view.set(PanelView::Control);
                }
                Err(ApiError::Credentials) => {
                    login_error.set(Some("Wrong username or password.".to_string()));
                }
                Err(ApiError::Network(_)) => {
                    login_error.set(Some(
                        "No response from the server. Check your connection.".to_string(),
                    ));
                }
                Err(error) => {
                    login_error.set(Some(error.to_string()));
                }
            }
            logging_in.set(false);
        });
    };

    let mut apply_actuator = move |kind: ActuatorKind, state: ActuatorState| {
        if command_pending() {
            return;
        }
        let Some(client) = api.peek().clone() else {
            status_message.set(Some("API client is not ready.".to_string()));
            return;
        };
        let Some(token) = session_token.peek().clone() else {
            view.set(PanelView::Login);
            return;
        };

        command_pending.set(true);
        status_message.set(None);
        spawn(async move {
            match client.set_actuator(kind, state, &token).await {
                Ok(message) => {
                    // Local state only mirrors acknowledged commands.
                    match kind {
                        ActuatorKind::Led => led_state.set(state),
                        ActuatorKind::Motor => motor_state.set(state),
                    }
                    toasts.success(
                        format!("{} turned {}", kind.label(), state.as_str()),
                        ToastOptions::new().description(message),
                    );
                }
                Err(ApiError::SessionExpired) => {
                    let store_value = store.peek().clone();
                    session::expire_session(&store_value).await;
                    session_token.set(None);
                    toasts.error(
                        "Session expired".to_string(),
                        ToastOptions::new().description("Sign in again to continue"),
                    );
                    view.set(PanelView::Login);
                }
                Err(error) => {
                    status_message.set(Some(error.to_string()));
                }
            }
            command_pending.set(false);
        });
    };

    let on_open_report = move |_| {
        // The token travels as the navigation parameter, same as after login.
        nav_token.set(session_token.peek().clone());
        export_notice.set(None);
        view.set(PanelView::Report);
    };

    let on_back_to_control = move |_| {
        view.set(PanelView::Control);
    };

    let on_request_logout = move |_| {
        confirm_logout.set(true);
    };

    let on_cancel_logout = move |_| {
        confirm_logout.set(false);
    };

    let on_confirm_logout = move |_| {
        confirm_logout.set(false);
        let store_value = store.peek().clone();
        let client = api.peek().clone();
        let token = session_token.peek().clone();
        spawn(async move {
            session::teardown_session(&store_value, client, token).await;
            session_token.set(None);
            nav_token.set(None);
            led_state.set(ActuatorState::Off);
            motor_state.set(ActuatorState::Off);
            readings.set(Vec::new());
            status_message.set(None);
            view.set(PanelView::Login);
        });
    };

    let on_export = move |_| {
        let records = readings.peek().clone();
        spawn(async move {
            match export_readings(&records).await {
                Ok(path) => {
                    export_notice.set(Some(format!("Report saved to {}", path.display())));
                }
                Err(error) => {
                    export_notice.set(None);
                    toasts.error(
                        "Export failed".to_string(),
                        ToastOptions::new().description(error.to_string()),
                    );
                }
            }
        });
    };

    let heading = match view() {
        PanelView::Login => "Sign in",
        PanelView::Control => "Control panel",
        PanelView::Report => "Sensor readings",
    };

    let status_line = |state: ActuatorState| {
        if state.is_on() {
            ("ON", "font-weight: 700; color: #00cc66;")
        } else {
            ("OFF", "font-weight: 700; color: #ff3b30;")
        }
    };
    let (led_status_text, led_status_style) = status_line(led_state());
    let (motor_status_text, motor_status_style) = status_line(motor_state());

    rsx! {
        style {
            "{MOBILE_UI_STYLES}"
        }
        style {
            "{TOAST_STYLES}"
        }

        div {
            style: "
                height: 100vh;
                display: flex;
                flex-direction: column;
                background: #f6f8fb;
                color: #111827;
                font-family: system-ui, sans-serif;
            ",

            div {
                style: "
                    padding: 14px 16px;
                    display: flex;
                    justify-content: space-between;
                    align-items: center;
                    background: #ffffff;
                ",
                h1 {
                    style: "margin: 0; font-size: 22px;",
                    "{heading}"
                }
                if view() != PanelView::Login {
                    UiButton {
                        r#type: "button",
                        variant: ButtonVariant::Outline,
                        onclick: on_request_logout,
                        "Sign out"
                    }
                }
            }

            if let Some(message) = status_message() {
                p {
                    style: "margin: 0; padding: 8px 16px; background: #fef2f2; color: #b91c1c; font-size: 13px;",
                    "{message}"
                }
            }

            if view() == PanelView::Login {
                div {
                    style: "flex: 1; display: flex; align-items: center; justify-content: center; padding: 20px;",
                    div {
                        style: "
                            width: 100%;
                            max-width: 360px;
                            background: #ffffff;
                            border: 1px solid #e5e7eb;
                            border-radius: 12px;
                            padding: 20px;
                            display: flex;
                            flex-direction: column;
                            gap: 12px;
                        ",
                        UiInput {
                            r#type: "text",
                            placeholder: "Username",
                            autocapitalize: "none",
                            value: "{username_input}",
                            oninput: move |event: Event<FormData>| {
                                username_input.set(event.value());
                            },
                        }
                        UiInput {
                            r#type: "password",
                            placeholder: "Password",
                            autocapitalize: "none",
                            value: "{password_input}",
                            oninput: move |event: Event<FormData>| {
                                password_input.set(event.value());
                            },
                        }
                        UiButton {
                            r#type: "button",
                            block: true,
                            disabled: logging_in(),
                            onclick: on_login,
                            if logging_in() { "Signing in..." } else { "Sign in" }
                        }
                        if let Some(error) = login_error() {
                            p {
                                style: "margin: 0; font-size: 13px; color: #ff3b30;",
                                "{error}"
                            }
                        }
                    }
                }
            } else if view() == PanelView::Control {
                div {
                    style: "flex: 1; padding: 16px; display: flex; flex-direction: column; gap: 16px;",

                    div {
                        style: "background: #ffffff; border: 1px solid #e5e7eb; border-radius: 12px; padding: 16px; display: flex; flex-direction: column; gap: 10px;",
                        p {
                            style: "margin: 0; font-size: 16px;",
                            "Current LED state: "
                            span {
                                style: "{led_status_style}",
                                "{led_status_text}"
                            }
                        }
                        div {
                            style: "display: flex; gap: 8px;",
                            UiButton {
                                r#type: "button",
                                variant: if led_state().is_on() { ButtonVariant::On } else { ButtonVariant::Primary },
                                disabled: command_pending(),
                                onclick: move |_| apply_actuator(ActuatorKind::Led, ActuatorState::On),
                                "Turn on"
                            }
                            UiButton {
                                r#type: "button",
                                variant: if led_state().is_on() { ButtonVariant::Outline } else { ButtonVariant::Danger },
                                disabled: command_pending(),
                                onclick: move |_| apply_actuator(ActuatorKind::Led, ActuatorState::Off),
                                "Turn off"
                            }
                        }
                    }

                    div {
                        style: "background: #ffffff; border: 1px solid #e5e7eb; border-radius: 12px; padding: 16px; display: flex; flex-direction: column; gap: 10px;",
                        p {
                            style: "margin: 0; font-size: 16px;",
                            "Current motor state: "
                            span {
                                style: "{motor_status_style}",
                                "{motor_status_text}"
                            }
                        }
                        div {
                            style: "display: flex; gap: 8px;",
                            UiButton {
                                r#type: "button",
                                variant: if motor_state().is_on() { ButtonVariant::On } else { ButtonVariant::Primary },
                                disabled: command_pending(),
                                onclick: move |_| apply_actuator(ActuatorKind::Motor, ActuatorState::On),
                                "Turn on"
                            }
                            UiButton {
                                r#type: "button",
                                variant: if motor_state().is_on() { ButtonVariant::Outline } else { ButtonVariant::Danger },
                                disabled: command_pending(),
                                onclick: move |_| apply_actuator(ActuatorKind::Motor, ActuatorState::Off),
                                "Turn off"
                            }
                        }
                    }

                    UiButton {
                        r#type: "button",
                        block: true,
                        variant: ButtonVariant::Outline,
                        onclick: on_open_report,
                        "View readings report"
                    }
                }
            } else {
                div {
                    style: "flex: 1; padding: 16px; display: flex; flex-direction: column; gap: 12px; overflow-y: auto;",

                    if readings_loading() {
                        p {
                            style: "margin: 0; color: #6b7280;",
                            "Loading readings..."
                        }
                    } else if let Some(error) = readings_error() {
                        p {
                            style: "margin: 0; color: #ff3b30;",
                            "{error}"
                        }
                    } else if readings().is_empty() {
                        p {
                            style: "margin: 0; color: #6b7280;",
                            "No readings available."
                        }
                    } else {
                        if let Some(stamp) = fetched_at() {
                            p {
                                style: "margin: 0; font-size: 12px; color: #9ca3af;",
                                "Fetched at {stamp}"
                            }
                        }
                        for reading in readings() {
                            div {
                                key: "{reading.id}",
                                style: "background: #ffffff; border: 1px solid #e5e7eb; border-radius: 12px; padding: 14px;",
                                p {
                                    style: "margin: 0 0 4px 0; font-weight: 600;",
                                    "Reading #{reading.id}"
                                }
                                p {
                                    style: "margin: 0; font-size: 14px;",
                                    "Output value: {reading.output_value}"
                                }
                                p {
                                    style: "margin: 0; font-size: 14px;",
                                    "Timestamp: {reading.timestamp}"
                                }
                                p {
                                    style: "margin: 0; font-size: 14px; color: #6b7280;",
                                    "Sensor {reading.sensor_id}, user {reading.user_id}"
                                }
                            }
                        }
                    }

                    UiButton {
                        r#type: "button",
                        block: true,
                        onclick: on_export,
                        "Download TXT report"
                    }
                    if let Some(notice) = export_notice() {
                        p {
                            style: "margin: 0; font-size: 13px; color: #00a653;",
                            "{notice}"
                        }
                    }
                    UiButton {
                        r#type: "button",
                        block: true,
                        variant: ButtonVariant::Outline,
                        onclick: on_back_to_control,
                        "Back to control panel"
                    }
                }
            }

            if confirm_logout() {
                div {
                    style: "
                        position: fixed;
                        inset: 0;
                        background: rgba(0, 0, 0, 0.5);
                        display: flex;
                        align-items: center;
                        justify-content: center;
                    ",
                    div {
                        style: "
                            background: #ffffff;
                            border-radius: 12px;
                            padding: 20px;
                            display: flex;
                            flex-direction: column;
                            gap: 14px;
                            max-width: 320px;
                        ",
                        p {
                            style: "margin: 0; font-size: 16px;",
                            "Sign out of the panel?"
                        }
                        div {
                            style: "display: flex; justify-content: flex-end; gap: 8px;",
                            UiButton {
                                r#type: "button",
                                variant: ButtonVariant::Outline,
                                onclick: on_cancel_logout,
                                "Cancel"
                            }
                            UiButton {
                                r#type: "button",
                                variant: ButtonVariant::Danger,
                                onclick: on_confirm_logout,
                                "Sign out"
                            }
                        }
                    }
                }
            }
        }
    }
}
