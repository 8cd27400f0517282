//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Enchanting Image Weaver"</h1>
            <p class="text-muted">"Transform your photos with AI magic, step by step."</p>
        </header>
    }
}
