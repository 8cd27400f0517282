//! ControlNet設定パネル（表示専用）
//!
//! ここで入力した値は生成リクエストには含まれない。

use leptos::prelude::*;
use image_weaver_common::settings::{STEP_RANGE, STEP_STEP, WEIGHT_RANGE, WEIGHT_STEP};
use image_weaver_common::{ControlField, Session, UnitId};

#[component]
pub fn SettingsPanel(session: RwSignal<Session>) -> impl IntoView {
    view! {
        <div class="settings-panel">
            <p class="text-muted">
                "These settings conceptually guide the AI to preserve the face and adjust the pose. "
                <span class="note">
                    "Note: The current AI model interprets these implicitly from your prompt and image. "
                    "For explicit ControlNet control, a different AI setup is required."
                </span>
            </p>
            <div class="settings-grid">
                <UnitCard session=session unit=UnitId::Face />
                <UnitCard session=session unit=UnitId::Pose />
            </div>
        </div>
    }
}

#[component]
fn UnitCard(session: RwSignal<Session>, unit: UnitId) -> impl IntoView {
    let (label, control_type, model) = session.with_untracked(|s| {
        let u = s.settings().unit(unit);
        (u.label.clone(), u.control_type.clone(), u.model.clone())
    });

    view! {
        <div class="unit-card">
            <h4>{label}</h4>
            <div class="settings-grid">
                <div class="form-group">
                    <label>"Control Type"</label>
                    <input type="text" value=control_type readonly=true />
                </div>
                <div class="form-group">
                    <label>"Model"</label>
                    <input type="text" value=model readonly=true />
                </div>
                <UnitField session=session unit=unit field=ControlField::Weight />
                <UnitField session=session unit=unit field=ControlField::StartStep />
                <UnitField session=session unit=unit field=ControlField::EndStep />
            </div>
        </div>
    }
}

#[component]
fn UnitField(session: RwSignal<Session>, unit: UnitId, field: ControlField) -> impl IntoView {
    let (label, range, step) = match field {
        ControlField::Weight => ("Control Weight", WEIGHT_RANGE, WEIGHT_STEP),
        ControlField::StartStep => ("Starting Control Step", STEP_RANGE, STEP_STEP),
        ControlField::EndStep => ("Ending Control Step", STEP_RANGE, STEP_STEP),
    };
    let id = format!("{:?}-{:?}", unit, field).to_lowercase();

    view! {
        <div class="form-group">
            <label for=id.clone()>{label}</label>
            <input
                type="number"
                id=id
                min=range.0.to_string()
                max=range.1.to_string()
                step=step.to_string()
                prop:value=move || session.with(|s| s.settings().unit(unit).value(field).to_string())
                on:change=move |ev| {
                    let input = event_target_value(&ev);
                    session.update(|s| s.settings_mut().unit_mut(unit).set_from_input(field, &input));
                }
            />
        </div>
    }
}
