//! ステップ切り替えタブ

use leptos::prelude::*;
use image_weaver_common::{Session, Step};

#[component]
pub fn StepTabs(session: RwSignal<Session>) -> impl IntoView {
    let tabs = Step::ALL
        .into_iter()
        .map(|step| {
            let is_active = move || session.with(|s| s.active_step() == step);
            let is_complete = move || session.with(|s| s.is_step_complete(step));
            // Step4は完了マークではなく生成中/生成済みのマーク
            let marker = if step == Step::Generate { "✨" } else { "✓" };

            view! {
                <button
                    class="step-tab"
                    class:active=is_active
                    class:complete=is_complete
                    data-step=step.as_str()
                    on:click=move |_| session.update(|s| s.select_step(step))
                >
                    {step.title()}
                    <Show when=is_complete>
                        <span class="step-marker">{marker}</span>
                    </Show>
                </button>
            }
        })
        .collect_view();

    view! { <nav class="step-tabs">{tabs}</nav> }
}
