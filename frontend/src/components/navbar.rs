use leptos::*;
use wasm_bindgen::JsCast;

use shared::{SaveEconomyRequest, SignInRequest};

use crate::api::{ApiClient, AuthState};
use crate::components::economy_badge::EconomyBadge;
use crate::economy::{should_persist, EconomyStore};

/// Viewport width (CSS pixels) above which the mobile menu cannot stay open.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Platforms offered in the downloads dropdown.
pub const DOWNLOAD_PLATFORMS: [&str; 5] = ["Android", "iOS", "Windows", "Linux", "MacOS"];

const SIGN_IN_PROVIDER: &str = "google";

/// True when a resize to `width` must force the mobile menu closed.
fn closes_mobile_menu(width: f64, open: bool) -> bool {
    open && width > MOBILE_BREAKPOINT
}

fn hamburger_class(open: bool) -> &'static str {
    if open {
        "navbar-burger open"
    } else {
        "navbar-burger"
    }
}

/// Top navigation bar: branding, downloads dropdown, mobile menu, settings
/// trigger and the sign-in/sign-out controls. Also owns the economy sync
/// lifecycle for its mounted lifetime: auth changes load the remote economy
/// record, and local economy changes are written back once loaded.
#[component]
pub fn Navbar(#[prop(into)] on_settings_click: Callback<()>) -> impl IntoView {
    let auth_state = expect_context::<AuthState>();
    let economy = expect_context::<EconomyStore>();

    let downloads_open = create_rw_signal(false);
    let mobile_open = create_rw_signal(false);

    // Economy load, driven by auth-state changes. The effect is scoped to
    // the component and disposed with it.
    {
        let auth_state = auth_state.clone();
        create_effect(move |_| {
            if auth_state.player.with(|player| player.is_some()) {
                wasm_bindgen_futures::spawn_local(async move {
                    match ApiClient::load_economy().await {
                        Ok(record) => economy.hydrate(record),
                        Err(e) => {
                            logging::error!("economy load failed: {}", e);
                            // Defaults, but keep saves locked: a failed load
                            // must never unlock writes over the real record.
                            economy.reset();
                        }
                    }
                });
            } else {
                economy.reset();
            }
        });
    }

    // Persist economy changes. Gated until the initial load has completed
    // for the current session; fire-and-forget, failures logged only.
    {
        let auth_state = auth_state.clone();
        create_effect(move |_| {
            let coins = economy.coins.get();
            let experience = economy.experience.get();
            let signed_in = auth_state.player.with(|player| player.is_some());
            let loaded = economy.loaded.get();

            if should_persist(signed_in, loaded) {
                wasm_bindgen_futures::spawn_local(async move {
                    let request = SaveEconomyRequest { coins, experience };
                    if let Err(e) = ApiClient::save_economy(request).await {
                        logging::error!("economy save failed: {}", e);
                    }
                });
            }
        });
    }

    // Force the mobile menu closed when the viewport grows past the
    // breakpoint. The listener lives exactly as long as the component.
    {
        let handler = wasm_bindgen::closure::Closure::wrap(Box::new(
            move |_: web_sys::Event| {
                let width = web_sys::window()
                    .and_then(|window| window.inner_width().ok())
                    .and_then(|width| width.as_f64())
                    .unwrap_or(0.0);
                if closes_mobile_menu(width, mobile_open.get_untracked()) {
                    mobile_open.set(false);
                }
            },
        ) as Box<dyn FnMut(_)>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("resize", handler.as_ref().unchecked_ref());
        }

        on_cleanup(move || {
            if let Some(window) = web_sys::window() {
                let _ = window
                    .remove_event_listener_with_callback("resize", handler.as_ref().unchecked_ref());
            }
            drop(handler);
        });
    }

    let signed_in = {
        let auth_state = auth_state.clone();
        move || auth_state.is_signed_in()
    };
    let signed_in_mobile = signed_in.clone();

    // Loading the economy after a successful sign-in is delegated entirely
    // to the auth effect above; the handler only publishes the session.
    let on_sign_in = {
        let auth_state = auth_state.clone();
        move |_| {
            let auth_state = auth_state.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let request = SignInRequest {
                    provider: SIGN_IN_PROVIDER.to_string(),
                };
                match ApiClient::sign_in(request).await {
                    Ok(response) => auth_state.set_session(response),
                    Err(e) => logging::error!("sign in failed: {}", e),
                }
            });
        }
    };

    // Session and economy go back to defaults no matter what the service
    // answered.
    let on_sign_out = {
        let auth_state = auth_state.clone();
        move |_| {
            let auth_state = auth_state.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = ApiClient::sign_out().await {
                    logging::error!("sign out failed: {}", e);
                }
                auth_state.clear_session();
                economy.reset();
            });
        }
    };
    let on_sign_in_mobile = on_sign_in.clone();
    let on_sign_out_mobile = Callback::new(on_sign_out.clone());

    view! {
        <nav class="navbar">
            <a href="/" class="navbar-brand">
                <img src="/assets/triplex.svg" alt="Triplex logo" class="navbar-logo" />
                "TRIPLEX"
            </a>

            <button
                class=move || hamburger_class(mobile_open.get())
                on:click=move |_| mobile_open.update(|open| *open = !*open)
            >
                <span class="burger-bar"></span>
                <span class="burger-bar"></span>
                <span class="burger-bar"></span>
            </button>

            <div class="navbar-links">
                <a href="#tutorial" class="navbar-link">"Tutorial"</a>

                <div
                    class="navbar-dropdown"
                    on:mouseenter=move |_| downloads_open.set(true)
                    on:mouseleave=move |_| downloads_open.set(false)
                >
                    <span class="navbar-link">
                        "Downloads"
                        <span class=move || {
                            if downloads_open.get() {
                                "chevron chevron-up"
                            } else {
                                "chevron"
                            }
                        }></span>
                    </span>
                    <Show when=move || downloads_open.get() fallback=|| ()>
                        <div class="navbar-dropdown-menu">
                            {DOWNLOAD_PLATFORMS
                                .iter()
                                .map(|platform| {
                                    view! {
                                        <a
                                            class="navbar-dropdown-item"
                                            href=format!("#download-{}", platform.to_lowercase())
                                        >
                                            {*platform}
                                        </a>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </Show>
                </div>

                <button class="navbar-link" on:click=move |_| on_settings_click.call(())>
                    "Settings"
                </button>

                <EconomyBadge />

                <Show
                    when=signed_in
                    fallback=move || {
                        let on_sign_in = on_sign_in.clone();
                        view! {
                            <button class="navbar-link" on:click=on_sign_in>"Sign In"</button>
                        }
                    }
                >
                    <button class="navbar-link" on:click=on_sign_out.clone()>"Sign Out"</button>
                </Show>
            </div>

            <Show when=move || mobile_open.get() fallback=|| ()>
                <div class="mobile-menu">
                    <div class="mobile-menu-panel">
                        <a
                            href="#tutorial"
                            class="mobile-menu-link"
                            on:click=move |_| mobile_open.set(false)
                        >
                            "Tutorial"
                        </a>
                        <button
                            class="mobile-menu-link"
                            on:click=move |_| {
                                mobile_open.set(false);
                                on_settings_click.call(());
                            }
                        >
                            "Settings"
                        </button>
                        <Show
                            when=signed_in_mobile.clone()
                            fallback={
                                let on_sign_in = on_sign_in_mobile.clone();
                                move || {
                                    let on_sign_in = on_sign_in.clone();
                                    view! {
                                        <button
                                            class="mobile-menu-link"
                                            on:click=move |ev| {
                                                mobile_open.set(false);
                                                on_sign_in(ev);
                                            }
                                        >
                                            "Sign In"
                                        </button>
                                    }
                                }
                            }
                        >
                            <button
                                class="mobile-menu-link"
                                on:click=move |ev| {
                                    mobile_open.set(false);
                                    on_sign_out_mobile.call(ev);
                                }
                            >
                                "Sign Out"
                            </button>
                        </Show>
                    </div>
                </div>
            </Show>
        </nav>
    }
}
