//! プロンプト入力コンポーネント

use leptos::prelude::*;
use image_weaver_common::{Session, Step};

#[component]
pub fn PromptPanel(session: RwSignal<Session>) -> impl IntoView {
    let is_complete = move || session.with(|s| s.is_step_complete(Step::Prompt));

    view! {
        <div class="form-group">
            <label for="prompt">"Prompt for New Background and Pose"</label>
            <textarea
                id="prompt"
                rows="6"
                placeholder="e.g., A person standing in front of the Eiffel Tower, wearing a red shirt, sunny day, realistic style, highly detailed, vibrant colors."
                prop:value=move || session.with(|s| s.prompt().to_string())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    session.update(|s| s.set_prompt(value));
                }
            />
            <Show when=is_complete>
                <div class="status-ok">"✓ Prompt entered!"</div>
            </Show>
        </div>
    }
}
