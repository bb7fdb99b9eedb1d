use leptos::prelude::*;
use leptos::task::spawn_local;
use zspace::forms::{self, Notice};

use crate::components::widgets::Toast;
use crate::state::use_app_state;

/// 首页底部的合作咨询表单
#[component]
pub fn ContactForm() -> impl IntoView {
    let app = use_app_state();
    let form = RwSignal::new(forms::ContactForm::default());
    let (is_submitting, set_is_submitting) = signal(false);
    let notice = RwSignal::new(Option::<Notice>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }
        set_is_submitting.set(true);

        let draft = form.get_untracked();
        spawn_local(async move {
            let result = draft.submit(&app.api()).await;
            let mut finished = draft;
            let outcome = finished.finish(result);
            if outcome.is_success() {
                form.set(finished);
            }
            notice.set(Some(outcome));
            set_is_submitting.set(false);
        });
    };

    let field = move |label: &'static str,
                      placeholder: &'static str,
                      required: bool,
                      read: fn(&forms::ContactForm) -> String,
                      write: fn(&mut forms::ContactForm, String)| {
        view! {
            <div class="form-control">
                <label class="label">
                    <span class="label-text text-white">
                        {label}
                        {required.then_some(view! { <span class="text-red-300">" *"</span> })}
                    </span>
                </label>
                <input
                    type="text"
                    placeholder=placeholder
                    class="input input-bordered bg-white/90 text-gray-900"
                    prop:value=move || form.with(read)
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| write(f, value));
                    }
                />
            </div>
        }
    };

    view! {
        <section class="w-full bg-brand-700 py-16">
            <Toast notice=notice />
            <div class="container mx-auto px-4 max-w-3xl">
                <div class="text-center text-white mb-10">
                    <h2 class="text-4xl font-bold mb-2">"Contact Us"</h2>
                    <p class="text-white/80">"留下您的联系方式，我们会尽快与您联系"</p>
                </div>
                <form class="grid grid-cols-1 md:grid-cols-2 gap-6" on:submit=on_submit>
                    {field("姓名", "请输入您的姓名", true, |f| f.contact_name.clone(), |f, v| f.contact_name = v)}
                    {field("电话", "请输入联系电话", true, |f| f.phone.clone(), |f, v| f.phone = v)}
                    {field("邮箱", "请输入邮箱", false, |f| f.email.clone(), |f, v| f.email = v)}
                    {field("公司名称", "请输入公司名称", false, |f| f.corporate_name.clone(), |f, v| f.corporate_name = v)}
                    <div class="md:col-span-2 flex justify-center mt-4">
                        <button
                            class="btn bg-white text-brand-700 hover:bg-brand-100 px-16"
                            disabled=move || is_submitting.get()
                        >
                            {move || if is_submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "提交中..." }.into_any()
                            } else {
                                "提交".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </section>
    }
}
