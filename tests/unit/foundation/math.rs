use super::*;

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(0, 255), 0);
    assert_eq!(mul_div255_u16(128, 255), 128);
    assert_eq!(mul_div255_u16(255, 128), 128);
}

#[test]
fn unpremultiply_leaves_opaque_and_transparent_alone() {
    let mut px = vec![10u8, 20, 30, 255, 0, 0, 0, 0, 64, 32, 0, 128];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[0..8], &[10, 20, 30, 255, 0, 0, 0, 0]);
    assert_eq!(&px[8..12], &[128, 64, 0, 128]);
}
