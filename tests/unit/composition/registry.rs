use super::*;

#[test]
fn declares_two_standard_targets() {
    let reg = CompositionRegistry::new(AnimationParams::default(), &ParamsOverride::default());
    let summary: Vec<(&str, u32, u32, u32, u64)> = reg
        .targets()
        .iter()
        .map(|t| {
            (
                t.id.as_str(),
                t.canvas.width,
                t.canvas.height,
                t.fps.num,
                t.duration_in_frames,
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("HelloWorld", 1920, 1080, 30, 150),
            ("HelloWorldVertical", 1080, 1920, 30, 150),
        ]
    );
    for t in reg.targets() {
        assert_eq!(t.component, ComponentKind::TitleAnimator);
        assert_eq!(t.params, AnimationParams::default());
    }
}

#[test]
fn overrides_flow_into_every_target() {
    let over = ParamsOverride {
        text: Some("Launch day".to_string()),
        duration_in_frames: Some(60),
        ..ParamsOverride::default()
    };
    let reg = CompositionRegistry::new(AnimationParams::default(), &over);
    assert_eq!(reg.defaults(), &AnimationParams::default());
    assert_eq!(reg.params().text, "Launch day");
    for t in reg.targets() {
        assert_eq!(t.duration_in_frames, 60);
        assert_eq!(t.params.text, "Launch day");
        assert_eq!(t.params.bg_color, "#ffffff");
        assert_eq!(t.frame_range().len_frames(), 60);
    }
}

#[test]
fn terminal_targets_are_opt_in() {
    let reg = CompositionRegistry::new(AnimationParams::default(), &ParamsOverride::default());
    assert!(reg.get("TerminalVertical").is_err());

    let reg = reg.with_terminal_targets().with_terminal_targets();
    assert_eq!(reg.targets().len(), 4);
    let t = reg.get("TerminalVertical").unwrap();
    assert_eq!(t.component, ComponentKind::TerminalTyper);
    assert_eq!(t.canvas, PORTRAIT);
}

#[test]
fn unknown_and_duplicate_ids_are_rejected() {
    let mut reg = CompositionRegistry::new(AnimationParams::default(), &ParamsOverride::default());
    let err = reg.get("Nope").unwrap_err().to_string();
    assert!(err.contains("HelloWorld"), "{err}");

    let dup = reg.targets()[0].clone();
    assert!(reg.register(dup).is_err());

    let square = RenderTarget::new(
        "Square",
        ComponentKind::TerminalTyper,
        Canvas {
            width: 1080,
            height: 1080,
        },
        AnimationParams::default(),
    );
    reg.register(square).unwrap();
    assert_eq!(reg.get("Square").unwrap().canvas.width, 1080);
}

#[test]
fn evaluate_binds_target_params_and_fps() {
    let reg = CompositionRegistry::new(AnimationParams::default(), &ParamsOverride::default());
    let t = reg.get("HelloWorld").unwrap();
    let desc = t.evaluate(FrameIndex(10));
    assert_eq!(desc.background, "#ffffff");
    assert_eq!(t.context(FrameIndex(10)).fps, COMPOSITION_FPS);
    assert_eq!(desc, t.evaluate(FrameIndex(10)));
}
