use leptos::*;

use crate::components::navbar::DOWNLOAD_PLATFORMS;

/// Landing page: hero, tutorial and download anchors targeted by the navbar.
#[component]
pub fn Home() -> impl IntoView {
    view! {
        <section class="hero">
            <h1 class="hero-title">"TRIPLEX"</h1>
            <p class="hero-subtitle">
                "Misère tic-tac-toe across three boards. Whoever completes a line loses."
            </p>
        </section>

        <section id="tutorial" class="section">
            <h2 class="section-title">"How to play"</h2>
            <p>
                "Both players place the same mark. Three boards are live at once; "
                "a board dies when it contains three in a row. The player forced "
                "to finish the last line loses the round."
            </p>
        </section>

        <section class="section">
            <h2 class="section-title">"Downloads"</h2>
            <ul class="download-list">
                {DOWNLOAD_PLATFORMS
                    .iter()
                    .map(|platform| {
                        view! {
                            <li id=format!("download-{}", platform.to_lowercase())>
                                {*platform}
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </section>
    }
}
