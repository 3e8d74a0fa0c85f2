use super::*;

#[test]
fn parses_hex_forms() {
    assert_eq!(CssColor::parse("#333333").unwrap(), CssColor::rgb(0x33, 0x33, 0x33));
    assert_eq!(CssColor::parse("#fff").unwrap(), CssColor::rgb(255, 255, 255));
    assert_eq!(CssColor::parse("#33FF00").unwrap(), CssColor::rgb(0x33, 0xff, 0x00));
    let c = CssColor::parse("#0000ff80").unwrap();
    assert_eq!((c.b, c.a), (255, 128));
    assert!(CssColor::parse("#12345").is_err());
    assert!(CssColor::parse("#ggg").is_err());
}

#[test]
fn parses_functional_forms() {
    assert_eq!(
        CssColor::parse("rgb(30, 30, 30)").unwrap(),
        CssColor::rgb(30, 30, 30)
    );
    let c = CssColor::parse("rgba(255, 0, 0, 0.5)").unwrap();
    assert_eq!((c.r, c.a), (255, 128));
    let c = CssColor::parse("rgb(255 0 0 / 50%)").unwrap();
    assert_eq!(c.a, 128);
    assert_eq!(
        CssColor::parse("hsl(0, 100%, 50%)").unwrap(),
        CssColor::rgb(255, 0, 0)
    );
    assert!(CssColor::parse("rgb(1, 2)").is_err());
}

#[test]
fn parses_named_colors_case_insensitively() {
    assert_eq!(CssColor::parse("White").unwrap(), CssColor::rgb(255, 255, 255));
    assert_eq!("transparent".parse::<CssColor>().unwrap().a, 0);
    assert!(CssColor::parse("not-a-color").is_err());
}

#[test]
fn premultiplies_by_alpha() {
    let c = CssColor {
        r: 255,
        g: 128,
        b: 0,
        a: 128,
    };
    assert_eq!(c.to_premul_rgba8(), [128, 64, 0, 128]);
    assert_eq!(CssColor::rgb(1, 2, 3).to_premul_rgba8(), [1, 2, 3, 255]);
}
