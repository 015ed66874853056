use chrono::{DateTime, Utc};
use std::fmt::Write;
use v_htmlescape::escape;

use super::content::{self, PRICING};
use super::countdown::CountdownSnapshot;
use super::form::{FormState, SubmissionFlow, SubmissionStatus, COUNTRY_CODES};
use super::vacancy::VacancySnapshot;
use super::LandingConfig;

const STYLES: &str = r#"
        * { box-sizing: border-box; }
        body {
            margin: 0;
            font-family: 'Inter', system-ui, -apple-system, 'Segoe UI', sans-serif;
            background: linear-gradient(180deg, #fff1f2, #ffffff 45%, #fffbeb);
            color: #111827;
            padding-bottom: 5rem;
        }
        .wrap { width: min(960px, 92vw); margin: 0 auto; }
        section { padding: 4rem 0; }
        h2 { font-size: clamp(1.8rem, 4vw, 2.6rem); text-align: center; margin: 0 0 1rem; }
        .lead { text-align: center; color: #4b5563; font-size: 1.15rem; margin-bottom: 2.5rem; }
        .dark { background: #000; color: #fff; }
        .accent { background: linear-gradient(135deg, #f59e0b, #f43f5e); color: #fff; }
        .countdown { padding: 1.5rem 0; text-align: center; }
        .countdown .units { display: flex; justify-content: center; gap: 1rem; }
        .countdown .unit { border-radius: 12px; padding: 1rem; min-width: 80px; }
        .countdown .value { font-size: 2.2rem; font-weight: 700; }
        .countdown .label { font-size: 0.8rem; color: #ffe4e6; }
        header { padding: 4rem 0; text-align: center; }
        header img { height: 6rem; }
        header h1 { font-size: clamp(2.5rem, 7vw, 4.5rem); margin: 1rem 0; }
        .badge { display: inline-block; border-radius: 999px; padding: 0.5rem 1.5rem; font-weight: 600; color: #000; }
        .facts { display: flex; flex-wrap: wrap; gap: 1.5rem; justify-content: center; margin: 2rem 0; }
        .cta { display: inline-block; border: none; border-radius: 12px; padding: 1.2rem 3rem; font-size: 1.2rem; font-weight: 700; cursor: pointer; text-decoration: none; }
        .cta[disabled] { opacity: 0.6; cursor: not-allowed; }
        .grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(240px, 1fr)); gap: 1.5rem; }
        .card { background: #fff; border-radius: 16px; padding: 1.75rem; box-shadow: 0 20px 40px rgba(0, 0, 0, 0.08); }
        .card.yes { border-left: 4px solid #22c55e; }
        .card.no { border-left: 4px solid #ef4444; }
        .stat { font-size: 3rem; font-weight: 700; color: #e11d48; text-align: center; }
        .video { aspect-ratio: 9 / 16; width: 100%; border: 0; border-radius: 12px; }
        .photos img { width: 100%; border-radius: 16px; }
        .vacancy { background: linear-gradient(135deg, #fff1f2, #fffbeb); border: 2px solid #fda4af; border-radius: 16px; padding: 1.5rem; margin-top: 2rem; }
        .vacancy .bar { background: #e5e7eb; border-radius: 999px; height: 1rem; overflow: hidden; }
        .vacancy .fill { height: 100%; border-radius: 999px; }
        .vacancy .warning { background: #fef3c7; border: 1px solid #fbbf24; border-radius: 8px; padding: 1rem; margin-top: 1rem; }
        details { background: #fff; border-radius: 12px; padding: 1rem 1.5rem; margin-bottom: 0.75rem; box-shadow: 0 8px 20px rgba(0, 0, 0, 0.06); }
        summary { font-weight: 600; cursor: pointer; }
        .price { text-align: center; }
        .price .old { text-decoration: line-through; color: #9ca3af; font-size: 1.5rem; }
        .price .now { font-size: 4rem; font-weight: 800; color: #e11d48; }
        form label { display: block; font-weight: 600; margin: 1rem 0 0.4rem; }
        form input, form select { width: 100%; padding: 0.9rem; border: 2px solid #e5e7eb; border-radius: 10px; font-size: 1rem; }
        .phone { display: flex; gap: 0.5rem; }
        .phone select { width: 8rem; }
        .error { background: #fef2f2; border: 1px solid #fecaca; color: #b91c1c; border-radius: 10px; padding: 1rem; margin-top: 1rem; }
        .confirmation { text-align: center; }
        .confirmation .check { font-size: 4rem; color: #16a34a; }
        .floating-cta { position: fixed; left: 0; right: 0; bottom: 0; padding: 0.75rem 1rem; z-index: 50; }
        .floating-cta a { display: block; text-align: center; background: #fff; color: #111827; border-radius: 12px; padding: 0.8rem; font-weight: 700; text-decoration: none; }
        @media (min-width: 768px) { .floating-cta { display: none; } }
        footer { padding: 3rem 0; text-align: center; }
"#;

const SCRIPT: &str = r#"
(function () {
    var form = document.getElementById('lead-form');
    if (form) {
        form.addEventListener('submit', function () {
            var button = form.querySelector('button[type=submit]');
            button.disabled = true;
            button.textContent = 'Enviando...';
        });
    }
    if (!window.EventSource) { return; }
    var source = new EventSource('/countdown');
    source.onmessage = function (event) {
        var snapshot = JSON.parse(event.data);
        ['days', 'hours', 'minutes', 'seconds'].forEach(function (unit) {
            var el = document.querySelector('[data-unit=' + unit + ']');
            if (el) { el.textContent = snapshot[unit]; }
        });
    };
    source.onerror = function () { source.close(); };
})();
"#;

/// Render the full landing page
///
/// `now` seeds the countdown so the page is correct before the first tick.
/// Once the deadline has passed the countdown shows zeros.
pub fn render_page(
    landing: &LandingConfig,
    form: &FormState,
    flow: &SubmissionFlow,
    now: DateTime<Utc>,
) -> String {
    let countdown = CountdownSnapshot::between(landing.deadline, now).unwrap_or_default();

    let mut html = String::with_capacity(32 * 1024);
    html.push_str(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Imersão Plano Prático</title>
    <style>"#,
    );
    html.push_str(STYLES);
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str(
        r##"<div class="floating-cta accent"><a href="#inscricao">Garantir Minha Vaga!</a></div>
"##,
    );
    html.push_str(&render_countdown(&countdown));
    html.push_str(&render_hero(&landing.vacancies));
    html.push_str(&render_results());
    html.push_str(&render_audience());
    html.push_str(&render_program());
    html.push_str(&render_trainer());
    html.push_str(&render_testimonials());
    html.push_str(&render_cohort(&landing.vacancies));
    html.push_str(&render_bonuses());
    html.push_str(&render_guarantee());
    html.push_str(&render_faq());
    html.push_str(&render_signup(form, flow));
    html.push_str(&render_footer());

    html.push_str("<script>");
    html.push_str(SCRIPT);
    html.push_str("</script>\n</body>\n</html>\n");
    html
}

pub fn render_countdown(snapshot: &CountdownSnapshot) -> String {
    let units = [
        ("days", snapshot.days, "DIAS"),
        ("hours", snapshot.hours, "HORAS"),
        ("minutes", snapshot.minutes, "MIN"),
        ("seconds", snapshot.seconds, "SEG"),
    ];

    let mut cells = String::new();
    for (unit, value, label) in units {
        let _ = write!(
            cells,
            r#"<div class="unit accent"><div class="value" data-unit="{unit}">{value}</div><div class="label">{label}</div></div>"#,
        );
    }

    format!(
        r#"<div class="countdown dark">
    <p><strong>Inscrições encerram em:</strong></p>
    <div class="units">{cells}</div>
</div>
"#
    )
}

pub fn render_vacancy(vacancies: &VacancySnapshot) -> String {
    format!(
        r#"<div class="vacancy">
    <h3>Status das Vagas</h3>
    <p><span>Vagas preenchidas</span> <strong class="fraction">{fraction}</strong></p>
    <div class="bar"><div class="fill accent" style="width: {percentage}%"></div></div>
    <div class="warning">
        <p><strong>{warning}</strong></p>
        <p>Garanta a sua antes que esgotem</p>
    </div>
</div>
"#,
        fraction = vacancies.fraction_text(),
        percentage = vacancies.filled_percentage(),
        warning = escape(&vacancies.warning_text()),
    )
}

fn render_hero(vacancies: &VacancySnapshot) -> String {
    format!(
        r##"<header class="dark">
    <div class="wrap">
        <img src="{logo}" alt="Plano Prático">
        <div><span class="badge accent">{badge}</span></div>
        <h1>{title}</h1>
        <p><strong>{tagline}</strong></p>
        <p>{subtitle}</p>
        <div class="facts">
            <span>📅 {date}</span>
            <span>🕐 {time}</span>
            <span>📍 {location}</span>
        </div>
        <a class="cta accent" href="#inscricao">Quero Garantir Minha Vaga Agora!</a>
    </div>
</header>
"##,
        logo = content::LOGO_URL,
        badge = escape(&vacancies.badge_text()),
        title = content::TITLE,
        tagline = content::TAGLINE,
        subtitle = content::SUBTITLE,
        date = content::EVENT_DATE,
        time = content::EVENT_TIME,
        location = content::EVENT_LOCATION,
    )
}

fn render_results() -> String {
    let mut cards = String::new();
    for stat in content::RESULTS {
        let _ = write!(
            cards,
            r#"<div class="card"><div class="stat">{}</div><p>{}</p></div>"#,
            stat.value, stat.caption
        );
    }

    format!(
        r#"<section><div class="wrap">
    <h2>Resultados Reais da Primeira Turma</h2>
    <p class="lead">Veja o impacto que a Imersão Plano Prático teve em quem participou</p>
    <div class="grid">{cards}</div>
</div></section>
"#
    )
}

fn render_audience() -> String {
    let mut yes = String::new();
    for item in content::FOR_YOU {
        let _ = write!(
            yes,
            r#"<div class="card yes"><h3>✔ {}</h3><p>{}</p></div>"#,
            item.title, item.detail
        );
    }

    let mut no = String::new();
    for item in content::NOT_FOR_YOU {
        let _ = write!(no, r#"<div class="card no"><p>✘ {}</p></div>"#, item);
    }

    format!(
        r#"<section><div class="wrap">
    <h2>Esta Imersão é Para Você Se...</h2>
    <div class="grid">{yes}</div>
    <h2 style="margin-top: 3rem">Esta Imersão NÃO é Para Você Se...</h2>
    <div class="grid">{no}</div>
</div></section>
"#
    )
}

fn render_program() -> String {
    let mut modules = String::new();
    for module in content::PROGRAM {
        let topics: String = module
            .topics
            .iter()
            .map(|topic| format!("<li>{}</li>", topic))
            .collect();
        let _ = write!(
            modules,
            r#"<div class="card"><h3>{}</h3><ul>{}</ul></div>"#,
            module.title, topics
        );
    }

    format!(
        r#"<section><div class="wrap">
    <h2>O Que Você Vai Aprender (e Implementar)</h2>
    <p class="lead">Estratégias específicas, passo a passo, que você pode começar a usar na segunda-feira</p>
    <div class="grid">{modules}</div>
</div></section>
"#
    )
}

fn render_trainer() -> String {
    let trainer = &content::TRAINER;
    let highlights: String = trainer
        .highlights
        .iter()
        .map(|item| format!("<li>{}</li>", item))
        .collect();

    format!(
        r#"<section class="dark"><div class="wrap">
    <h2>Quem é o Treinador</h2>
    <p class="lead">Profissional com resultados comprovados no mercado de estética</p>
    <div class="grid">
        <img src="{photo}" alt="{name}" style="width: 100%; border-radius: 16px">
        <div><h3>{name}</h3><p>{role}</p><ul>{highlights}</ul></div>
    </div>
</div></section>
"#,
        photo = trainer.photo_url,
        name = trainer.name,
        role = trainer.role,
    )
}

fn render_testimonials() -> String {
    let mut videos = String::new();
    for testimonial in content::TESTIMONIALS {
        let _ = write!(
            videos,
            r#"<div class="card"><iframe class="video" src="https://www.youtube.com/embed/{id}" title="Depoimento {name}" allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture" allowfullscreen></iframe><p><strong>{name}</strong></p></div>"#,
            id = testimonial.video_id,
            name = testimonial.name,
        );
    }

    format!(
        r#"<section><div class="wrap">
    <h2>Depoimentos da Primeira Turma</h2>
    <p class="lead">Veja o que as participantes têm a dizer sobre a experiência</p>
    <div class="grid">{videos}</div>
</div></section>
"#
    )
}

fn render_cohort(vacancies: &VacancySnapshot) -> String {
    let photos: String = content::COHORT_PHOTOS
        .iter()
        .map(|(src, alt)| format!(r#"<img src="{}" alt="{}">"#, src, alt))
        .collect();

    format!(
        r#"<section><div class="wrap">
    <h2>Como Foi a Primeira Turma</h2>
    <p class="lead">Uma experiência transformadora que mudou a forma como essas profissionais gerenciam seus negócios</p>
    <div class="grid photos">{photos}</div>
    {vacancy}
</div></section>
"#,
        vacancy = render_vacancy(vacancies),
    )
}

fn render_bonuses() -> String {
    let mut cards = String::new();
    for bonus in content::BONUSES {
        let _ = write!(
            cards,
            r#"<div class="card"><h3>🎁 {}</h3><p>{} (Valor: €{})</p></div>"#,
            bonus.title, bonus.detail, bonus.value_eur
        );
    }

    format!(
        r#"<section><div class="wrap">
    <h2>Bônus Exclusivos</h2>
    <p class="lead">Além de todo o conteúdo da imersão, você também recebe:</p>
    <div class="grid">{cards}</div>
    <p class="lead"><strong>Total em Bônus: €{total}</strong><br>Tudo isso incluído no seu investimento de €{price}</p>
</div></section>
"#,
        total = content::bonus_total_eur(),
        price = PRICING.price_eur,
    )
}

fn render_guarantee() -> String {
    r#"<section><div class="wrap card" style="text-align: center">
    <h2>Garantia de Satisfação</h2>
    <h3>Risco Zero para Você</h3>
    <p>Participe da imersão e, se nos primeiros 30 minutos você sentir que o conteúdo não é para você,
    devolvemos 100% do seu investimento. Sem perguntas, sem burocracia.</p>
    <p><strong>Todo o risco é nosso. Todo o ganho é seu.</strong></p>
</div></section>
"#
    .to_string()
}

fn render_faq() -> String {
    let items: String = content::FAQS
        .iter()
        .map(|faq| {
            format!(
                "<details><summary>{}</summary><p>{}</p></details>",
                faq.question, faq.answer
            )
        })
        .collect();

    format!(
        r#"<section><div class="wrap">
    <h2>Perguntas Frequentes</h2>
    <p class="lead">Tire suas dúvidas antes de garantir sua vaga</p>
    {items}
</div></section>
"#
    )
}

fn render_signup(form: &FormState, flow: &SubmissionFlow) -> String {
    let body = match flow.status() {
        SubmissionStatus::Submitted => render_confirmation(),
        _ => render_form(form, flow),
    };

    format!(
        r#"<section id="inscricao"><div class="wrap">
    <h2>Garanta Sua Vaga Agora</h2>
    <div class="price">
        <p>Investimento único e simbólico</p>
        <div><span class="old">€{list}</span> <span class="badge accent">{discount}</span></div>
        <div class="now">€{price}</div>
        <p>Valor promocional válido apenas para esta turma</p>
        <p><strong>Economia de €{bonus} + Acesso a todos os bônus</strong></p>
        <p>5 horas de conteúdo transformador + €{bonus} em bônus</p>
    </div>
    <div class="card">{body}</div>
</div></section>
"#,
        list = PRICING.list_price_eur,
        discount = PRICING.discount_label,
        price = PRICING.price_eur,
        bonus = content::bonus_total_eur(),
    )
}

/// Lead form, populated from `form` and reflecting `flow`'s error and status
pub fn render_form(form: &FormState, flow: &SubmissionFlow) -> String {
    let mut options = String::new();
    for (code, label) in COUNTRY_CODES {
        let selected = if *code == form.country_code { " selected" } else { "" };
        let _ = write!(options, r#"<option value="{code}"{selected}>{label}</option>"#);
    }

    let error = flow
        .error()
        .map(|message| format!(r#"<div class="error" role="alert">{}</div>"#, escape(message)))
        .unwrap_or_default();

    let disabled = if flow.submit_disabled() { " disabled" } else { "" };

    format!(
        r#"<form id="lead-form" method="post" action="/leads">
    <input type="hidden" name="submission_id" value="{submission_id}">
    <label for="name">Nome completo *</label>
    <input type="text" id="name" name="name" required value="{name}" placeholder="Seu nome completo">
    <label for="phone">Telefone (WhatsApp) *</label>
    <div class="phone">
        <select name="country_code">{options}</select>
        <input type="tel" id="phone" name="phone" required value="{phone}" placeholder="123 456 789">
    </div>
    <label for="email">E-mail *</label>
    <input type="email" id="email" name="email" required value="{email}" placeholder="seu@email.com">
    {error}
    <p><button type="submit" class="cta accent"{disabled}>{label}</button></p>
    <p><strong>Próximo passo:</strong> Após preencher o formulário, você receberá as instruções de pagamento por WhatsApp e e-mail para confirmar sua vaga.</p>
    <p>🛡 Pagamento Seguro · ✔ Dados Protegidos</p>
</form>
"#,
        submission_id = form.submission_id,
        name = escape(&form.name),
        phone = escape(&form.phone),
        email = escape(&form.email),
        label = flow.submit_label(),
    )
}

pub fn render_confirmation() -> String {
    r#"<div class="confirmation">
    <div class="check">✓</div>
    <h3>Pré-inscrição Recebida com Sucesso!</h3>
    <p>Em breve entraremos em contato via WhatsApp e e-mail com as informações de pagamento para confirmar sua vaga na Imersão Plano Prático.</p>
    <p><strong>Atenção: Sua vaga só será confirmada após o pagamento!</strong></p>
    <p>Fique atenta ao seu WhatsApp e e-mail para não perder os detalhes de pagamento e confirmação.</p>
</div>
"#
    .to_string()
}

fn render_footer() -> String {
    format!(
        r#"<footer class="dark">
    <img src="{logo}" alt="Plano Prático" style="height: 4rem">
    <p><strong>{title}</strong></p>
    <p>{line}</p>
    <p>© 2025 Plano Prático. Todos os direitos reservados.</p>
</footer>
"#,
        logo = content::LOGO_URL,
        title = content::TITLE,
        line = content::FOOTER_LINE,
    )
}
