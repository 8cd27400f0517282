//! フッターコンポーネント

use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    let year = js_sys::Date::new_0().get_full_year();

    view! {
        <footer class="footer">
            <p>{format!("© {} PhotoEnhance. All rights reserved.", year)}</p>
            <nav>
                <a href="#">"Privacy Policy"</a>
                <a href="#">"Terms of Service"</a>
                <a href="#">"Contact Us"</a>
            </nav>
        </footer>
    }
}
