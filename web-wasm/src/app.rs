//! メインアプリケーションコンポーネント
//!
//! ウィザードの状態はすべて `Session` に集約し、各ステップのパネルへ
//! 同じシグナルを渡す。生成APIの呼び出しだけは非同期で行う。

use leptos::prelude::*;
use leptos::task::spawn_local;
use image_weaver_common::{ClientConfig, GenerationService, SelectedFile, Session, Step};

use crate::api::fal::FalProxyClient;
use crate::components::{
    compare_slider::CompareSlider,
    filter_controls::FilterControls,
    footer::Footer,
    generate_panel::GeneratePanel,
    header::Header,
    prompt_panel::PromptPanel,
    settings_panel::SettingsPanel,
    step_tabs::StepTabs,
    upload_area::UploadArea,
};
use crate::logging;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let session = RwSignal::new(Session::default());
    let active_step = active_step_memo(session);
    let client = FalProxyClient::new(ClientConfig::default());
    logging::info(format!("generation target: {}", client.config().target_url()));

    // 生成ハンドラ
    let on_generate = move |_: ()| {
        let Some(started) = session.try_update(|s| s.begin_generation()) else {
            return;
        };
        let request = match started {
            Ok(request) => request,
            Err(error) => {
                logging::report::<()>("generate", &Err(error));
                return;
            }
        };

        let client = client.clone();
        spawn_local(async move {
            logging::info("generation started");
            let outcome = client.generate(&request).await;
            logging::report("generate", &outcome);
            // 待っている間にアンマウントされていれば結果は捨てる
            if session.try_update(|s| s.finish_generation(outcome)).is_none() {
                logging::info("generation finished after unmount; result discarded");
            }
        });
    };

    view! {
        <div class="container">
            <Header />

            <div class="card">
                <StepTabs session=session />

                <div class="step-body">
                    {move || match active_step.get() {
                        Step::Photo => view! { <PhotoStep session=session /> }.into_any(),
                        Step::Configuration => view! {
                            <StepFrame session=session title="Step 2: ControlNet Configuration">
                                <SettingsPanel session=session />
                            </StepFrame>
                        }
                        .into_any(),
                        Step::Prompt => view! {
                            <StepFrame session=session title="Step 3: Describe Your Vision">
                                <PromptPanel session=session />
                            </StepFrame>
                        }
                        .into_any(),
                        Step::Generate => view! {
                            <div>
                                <h2 class="step-title">"Step 4: Generate Your Image"</h2>
                                <GeneratePanel session=session on_generate=on_generate.clone() />
                                <div class="step-nav">
                                    <button
                                        class="btn btn-secondary"
                                        disabled=move || session.with(|s| s.is_loading())
                                        on:click=move |_| { session.update(|s| { s.go_back(); }); }
                                    >
                                        "Back to Prompt"
                                    </button>
                                </div>
                            </div>
                        }
                        .into_any(),
                    }}
                </div>
            </div>

            <Footer />
        </div>
    }
}

/// 表示中のステップ
///
/// セッション全体ではなくステップの切り替えだけで再描画させる。
/// 補正値やプロンプトの変更でステップごと作り直すと、
/// 比較スライダーの位置などコンポーネント内の状態が失われる。
fn active_step_memo(session: RwSignal<Session>) -> Memo<Step> {
    Memo::new(move |_| session.with(|s| s.active_step()))
}

/// Step1: 写真の選択と明るさ・コントラスト補正
#[component]
fn PhotoStep(session: RwSignal<Session>) -> impl IntoView {
    let selected = Signal::derive(move || {
        session.with(|s| s.photo().map(|p| (p.file_name.clone(), p.size_kb())))
    });
    let has_photo = move || session.with(|s| s.photo().is_some());
    let original = Memo::new(move |_| {
        session.with(|s| s.photo().map(|p| p.preview_url.clone()).unwrap_or_default())
    });
    let enhanced = Memo::new(move |_| {
        session.with(|s| s.filtered().map(|f| f.data_url.clone()).unwrap_or_default())
    });
    let error = move || session.with(|s| s.error_for(Step::Photo));

    let on_file_selected = move |file: SelectedFile| {
        let name = file.name.clone();
        if let Some(result) = session.try_update(|s| s.select_file(file)) {
            logging::report(&format!("select {name}"), &result);
        }
    };
    let on_delete = move |_: ()| {
        session.update(|s| s.delete_photo());
        logging::info("photo deleted");
    };

    view! {
        <div>
            <h2 class="step-title">"Step 1: Prepare Your Photo"</h2>
            <UploadArea selected=selected on_file_selected=on_file_selected on_delete=on_delete />

            <Show when=has_photo>
                <FilterControls session=session />
                <div class="compare-wrapper">
                    <CompareSlider
                        before=original
                        after=enhanced
                        before_label="Original"
                        after_label="Enhanced"
                    />
                </div>
            </Show>

            {move || error().map(|message| view! { <div class="error-message">{message}</div> })}

            <div class="step-nav">
                <span></span>
                <NextButton session=session />
            </div>
        </div>
    }
}

/// Step2/3 の共通枠（タイトルと戻る・次へ）
#[component]
fn StepFrame(session: RwSignal<Session>, title: &'static str, children: Children) -> impl IntoView {
    view! {
        <div>
            <h2 class="step-title">{title}</h2>
            {children()}
            <div class="step-nav">
                <button
                    class="btn btn-secondary"
                    on:click=move |_| { session.update(|s| { s.go_back(); }); }
                >
                    "Back"
                </button>
                <NextButton session=session />
            </div>
        </div>
    }
}

#[component]
fn NextButton(session: RwSignal<Session>) -> impl IntoView {
    view! {
        <button
            class="btn btn-primary"
            disabled=move || !session.with(|s| s.can_advance())
            on:click=move |_| { session.update(|s| { s.advance(); }); }
        >
            "Next"
        </button>
    }
}
