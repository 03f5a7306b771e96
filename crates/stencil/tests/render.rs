use serde_json::json;
use stencil::{render, render_with_config, Diagnostic, Limits, RenderConfig, Renderer};

#[test]
fn test_render_is_pure() {
    let template = "{{#each xs}}{{#if this.on}}{{this.label}} {{this.amount}};{{/if}}{{/each}}";
    let ctx = json!({"xs": [
        {"on": true, "label": "a", "amount": 1.5},
        {"on": false, "label": "b", "amount": 2},
        {"on": 1, "label": "c", "amount": "3"}
    ]});

    let first = render(template, &ctx);
    assert_eq!(first, "a $1.50;c $3.00;");
    for _ in 0..5 {
        assert_eq!(render(template, &ctx), first);
    }
}

#[test]
fn test_missing_path_renders_empty() {
    assert_eq!(render("{{a.b.c}}", &json!({})), "");
}

#[test]
fn test_conditional_true_false_missing() {
    let template = "{{#if flag}}A{{else}}B{{/if}}";
    assert_eq!(render(template, &json!({"flag": true})), "A");
    assert_eq!(render(template, &json!({"flag": false})), "B");
    assert_eq!(render(template, &json!({})), "B");
}

#[test]
fn test_scalar_iteration() {
    assert_eq!(
        render("{{#each items}}{{this}}{{/each}}", &json!({"items": [1, 2, 3]})),
        "123"
    );
}

#[test]
fn test_object_iteration() {
    assert_eq!(
        render(
            "{{#each items}}{{this.name}}-{{/each}}",
            &json!({"items": [{"name": "a"}, {"name": "b"}]})
        ),
        "a-b-"
    );
}

#[test]
fn test_currency_formatting() {
    assert_eq!(render("{{price}}", &json!({"price": 9.5})), "$9.50");
}

#[test]
fn test_non_iterable_each_target() {
    assert_eq!(
        render(
            "{{#each items}}{{this}}{{/each}}",
            &json!({"items": "not-an-array"})
        ),
        ""
    );
}

#[test]
fn test_malformed_template_is_contained() {
    let out = render("before {{#if flag}} after", &json!({"flag": true}));
    assert!(out.contains("template-error"));
    assert!(out.contains("never closed"));

    let out = render("{{#if}}", &json!({}));
    assert!(out.contains("template-error"));
}

#[test]
fn test_nesting_resolves_innermost_scope() {
    assert_eq!(
        render(
            "{{#each groups}}{{#if this.active}}{{this.name}}{{/if}}{{/each}}",
            &json!({"groups": [
                {"active": true, "name": "x"},
                {"active": false, "name": "y"}
            ]})
        ),
        "x"
    );
}

#[test]
fn test_same_kind_nesting_pairs_correctly() {
    let template = "{{#if a}}[{{#if b}}B{{else}}!B{{/if}}]{{else}}!A{{/if}}";
    assert_eq!(render(template, &json!({"a": true, "b": true})), "[B]");
    assert_eq!(render(template, &json!({"a": true, "b": false})), "[!B]");
    assert_eq!(render(template, &json!({"a": false, "b": true})), "!A");
}

#[test]
fn test_context_is_not_mutated() {
    let ctx = json!({"items": [{"name": "a"}], "title": "t"});
    let before = ctx.clone();
    render("{{#each items}}{{this.name}}{{title}}{{/each}}", &ctx);
    assert_eq!(ctx, before);
}

#[test]
fn test_tool_response_card() {
    let template = r#"<div class="card">
<h3>{{flight.number}} to {{flight.destination}}</h3>
<p>Departs {{flight.departureDate}}{{#if flight.delayed}} (delayed){{/if}}</p>
<ul>{{#each flight.fares}}<li>{{this.cabin}}: {{this.price}}{{#if this.seatsLeft}} ({{this.seatsLeft}} left){{else}} (sold out){{/if}}</li>{{/each}}</ul>
</div>"#;
    let payload = json!({
        "flight": {
            "number": "SK4035",
            "destination": "Tromsø",
            "departureDate": "2024-12-02T06:45:00+01:00",
            "delayed": false,
            "fares": [
                {"cabin": "Economy", "price": 1099, "seatsLeft": 4},
                {"cabin": "Plus", "price": 1899.5, "seatsLeft": 0}
            ]
        }
    });

    let expected = r#"<div class="card">
<h3>SK4035 to Tromsø</h3>
<p>Departs 12/2/2024</p>
<ul><li>Economy: $1,099.00 (4 left)</li><li>Plus: $1,899.50 (sold out)</li></ul>
</div>"#;
    assert_eq!(render(template, &payload), expected);
}

#[test]
fn test_shared_renderer_for_both_response_kinds() {
    let mut renderer = Renderer::new();
    renderer
        .add_template("custom", "{{#each results}}{{this.title}}\n{{/each}}")
        .unwrap();
    renderer
        .add_template("template", "{{count}} results")
        .unwrap();

    let payload = json!({"count": 2, "results": [{"title": "one"}, {"title": "two"}]});
    assert_eq!(renderer.render_named("custom", &payload), "one\ntwo\n");
    assert_eq!(renderer.render_named("template", &payload), "2 results");
}

#[test]
fn test_limits_from_yaml() {
    let config = RenderConfig::from_yaml(
        "diagnostic: plain\nlimits:\n  max_iterations: 3\n",
    )
    .unwrap();
    assert_eq!(config.limits, Limits::unbounded().max_iterations(3));

    let ctx = json!({"xs": [1, 2, 3, 4]});
    let out = render_with_config("{{#each xs}}{{this}}{{/each}}", &ctx, &config);
    assert_eq!(out, "[template error: iteration limit exceeded (max 3)]");

    let relaxed = config.limits(Limits::unbounded()).diagnostic(Diagnostic::Markup);
    assert_eq!(
        render_with_config("{{#each xs}}{{this}}{{/each}}", &ctx, &relaxed),
        "1234"
    );
}

fn deeply_nested_if(depth: usize) -> String {
    format!("{}x{}", "{{#if a}}".repeat(depth), "{{/if}}".repeat(depth))
}

#[test]
fn test_depth_limit_contains_adversarial_nesting() {
    let template = deeply_nested_if(20_000);
    let config = RenderConfig::new()
        .diagnostic(Diagnostic::Plain)
        .limits(Limits::unbounded().max_depth(8));

    assert_eq!(
        render_with_config(&template, &json!({"a": true}), &config),
        "[template error: nesting depth limit exceeded (max 8)]"
    );
}

#[test]
fn test_depth_limit_rejects_adversarial_registration() {
    let config = RenderConfig::new().limits(Limits::unbounded().max_depth(8));
    let mut renderer = Renderer::with_config(config);

    let err = renderer
        .add_template("deep", &deeply_nested_if(200_000))
        .unwrap_err();
    assert_eq!(
        err,
        stencil::RenderError::LimitExceeded {
            kind: stencil::LimitKind::Depth,
            max: 8
        }
    );
    assert!(!renderer.has_template("deep"));
}

#[test]
fn test_depth_limit_allows_templates_at_the_bound() {
    let config = RenderConfig::new().limits(Limits::unbounded().max_depth(8));
    assert_eq!(
        render_with_config(&deeply_nested_if(8), &json!({"a": 1}), &config),
        "x"
    );
}
