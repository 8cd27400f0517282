//! 生成ボタン・結果表示コンポーネント

use leptos::prelude::*;
use image_weaver_common::{Session, Step};

use super::compare_slider::CompareSlider;

#[component]
pub fn GeneratePanel<FG>(session: RwSignal<Session>, on_generate: FG) -> impl IntoView
where
    FG: Fn(()) + 'static + Clone + Send + Sync,
{
    let is_loading = move || session.with(|s| s.is_loading());
    // Data URLは大きいので、変わったときだけ下流に流す
    let filtered_url =
        Memo::new(move |_| session.with(|s| s.filtered().map(|f| f.data_url.clone())));
    let generated = Memo::new(move |_| session.with(|s| s.generated_image().cloned()));
    let error = move || session.with(|s| s.error_for(Step::Generate));

    let original = Memo::new(move |_| {
        session.with(|s| s.photo().map(|p| p.preview_url.clone()).unwrap_or_default())
    });
    let generated_url =
        Memo::new(move |_| generated.get().map(|image| image.url).unwrap_or_default());

    view! {
        <div class="review-grid">
            <div class="review-card">
                <h4>"Input Image:"</h4>
                {move || match filtered_url.get() {
                    Some(url) => view! { <img class="preview" src=url alt="Input Preview" /> }.into_any(),
                    None => view! { <p class="text-muted">"No image uploaded."</p> }.into_any(),
                }}
            </div>
            <div class="review-card">
                <h4>"Your Prompt:"</h4>
                <p class="prompt-text">
                    {move || session.with(|s| {
                        if s.prompt().is_empty() {
                            "No prompt entered.".to_string()
                        } else {
                            s.prompt().to_string()
                        }
                    })}
                </p>
            </div>
        </div>

        <button
            class="btn btn-primary btn-wide"
            disabled=move || !session.with(|s| s.can_generate())
            on:click={
                let on_generate = on_generate.clone();
                move |_| on_generate(())
            }
        >
            {move || if is_loading() { "Casting Spell..." } else { "Generate Transformed Image ✨" }}
        </button>

        {move || error().map(|message| view! { <div class="error-message">{message}</div> })}

        <Show
            when=move || generated.with(|g| g.is_some())
            fallback=move || view! {
                <Show when=move || !is_loading()>
                    <div class="placeholder">
                        <div class="upload-icon">"🖼"</div>
                        <p>"Your magical creation will appear here."</p>
                    </div>
                </Show>
            }
        >
            <div class="result">
                <h3>"Compare Images:"</h3>
                <CompareSlider
                    before=original
                    after=generated_url
                    before_label="Original Photo"
                    after_label="Transformed Photo"
                />
                <p class="text-muted">
                    <a href=move || generated_url.get() target="_blank" rel="noopener noreferrer">
                        {move || {
                            generated
                                .get()
                                .map(|image| {
                                    if image.file_name.is_empty() {
                                        "Open generated image".to_string()
                                    } else {
                                        format!("Open {}", image.file_name)
                                    }
                                })
                                .unwrap_or_default()
                        }}
                    </a>
                    " · Image generated by Fal AI."
                </p>
            </div>
        </Show>
    }
}
