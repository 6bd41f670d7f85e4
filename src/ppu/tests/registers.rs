//! Register file behavior

use super::*;

// ========================================
// PPUSTATUS Tests
// ========================================

#[test]
fn test_status_read_clears_vblank() {
    let (mut ppu, _) = test_ppu();
    run_to(&mut ppu, 241, 2); // just past the VBlank set dot

    let first = ppu.read(PPUSTATUS);
    assert_ne!(first & 0x80, 0, "VBlank visible on the first read");

    let second = ppu.read(PPUSTATUS);
    assert_eq!(second & 0x80, 0, "the read cleared the flag");
}

#[test]
fn test_status_read_resets_write_toggle() {
    let (mut ppu, _) = test_ppu();

    // First half of an address pair, then a status read, then a full pair:
    // the pair must start over
    ppu.write(PPUADDR, 0x3F);
    ppu.read(PPUSTATUS);
    set_vram_address(&mut ppu, 0x2155);
    ppu.write(PPUDATA, 0x42);

    set_vram_address(&mut ppu, 0x2155);
    assert_eq!(ppu.read(PPUDATA), 0, "buffered");
    assert_eq!(ppu.read(PPUDATA), 0x42, "write landed at $2155, not $3F21");
}

#[test]
fn test_write_only_registers_read_zero() {
    let (mut ppu, _) = test_ppu();
    assert_eq!(ppu.read(PPUCTRL), 0);
    assert_eq!(ppu.read(PPUMASK), 0);
    assert_eq!(ppu.read(OAMADDR), 0);
    assert_eq!(ppu.read(PPUSCROLL), 0);
    assert_eq!(ppu.read(PPUADDR), 0);
}

// ========================================
// PPUADDR / PPUDATA Tests
// ========================================

#[test]
fn test_address_pair_targets_exact_address() {
    let (mut ppu, _) = test_ppu();

    poke_vram(&mut ppu, 0x23C5, 0x99);

    set_vram_address(&mut ppu, 0x23C5);
    ppu.read(PPUDATA); // prime the buffer
    assert_eq!(ppu.read(PPUDATA), 0x99);
}

#[test]
fn test_address_first_byte_zero_still_latches() {
    // A $00 high byte is a real first write; the toggle is a boolean, not
    // a value test
    let (mut ppu, _) = test_ppu();

    ppu.write(PPUADDR, 0x00);
    ppu.write(PPUADDR, 0x20);
    ppu.write(PPUDATA, 0x55);

    set_vram_address(&mut ppu, 0x0020);
    ppu.read(PPUDATA);
    assert_eq!(ppu.read(PPUDATA), 0x55, "address pair composed $0020");
}

#[test]
fn test_data_read_is_buffered() {
    let (mut ppu, _) = test_ppu();
    poke_vram(&mut ppu, 0x2100, 0x11);
    poke_vram(&mut ppu, 0x2101, 0x22);

    set_vram_address(&mut ppu, 0x2100);
    let stale = ppu.read(PPUDATA);
    let first = ppu.read(PPUDATA);
    let second = ppu.read(PPUDATA);

    assert_eq!(stale, 0x00, "first read returns the stale buffer");
    assert_eq!(first, 0x11);
    assert_eq!(second, 0x22);
}

#[test]
fn test_palette_read_bypasses_buffer() {
    let (mut ppu, _) = test_ppu();
    poke_vram(&mut ppu, 0x3F01, 0x30);

    set_vram_address(&mut ppu, 0x3F01);
    assert_eq!(ppu.read(PPUDATA), 0x30, "palette data arrives without delay");
}

#[test]
fn test_increment_mode_one() {
    let (mut ppu, _) = test_ppu();
    poke_vram(&mut ppu, 0x2100, 0xAA);
    poke_vram(&mut ppu, 0x2101, 0xBB);

    set_vram_address(&mut ppu, 0x2100);
    ppu.read(PPUDATA);
    assert_eq!(ppu.read(PPUDATA), 0xAA);
    assert_eq!(ppu.read(PPUDATA), 0xBB, "address stepped by 1 per access");
}

#[test]
fn test_increment_mode_thirty_two() {
    let (mut ppu, _) = test_ppu();
    poke_vram(&mut ppu, 0x2100, 0xAA);
    poke_vram(&mut ppu, 0x2120, 0xBB);

    ppu.write(PPUCTRL, 0x04); // +32 increment
    set_vram_address(&mut ppu, 0x2100);
    ppu.read(PPUDATA);
    assert_eq!(ppu.read(PPUDATA), 0xAA);
    assert_eq!(ppu.read(PPUDATA), 0xBB, "address stepped by 32 per access");
}

#[test]
fn test_vram_address_wraps_at_3fff() {
    let (mut ppu, _) = test_ppu();
    poke_vram(&mut ppu, 0x0000, 0x77);

    set_vram_address(&mut ppu, 0x3FFF);
    ppu.read(PPUDATA); // advances past the top
    ppu.read(PPUDATA); // buffer now holds $0000
    set_vram_address(&mut ppu, 0x0001);
    let buffered = ppu.read(PPUDATA);
    assert_eq!(buffered, 0x77, "address wrapped into pattern space");
}

// ========================================
// PPUCTRL Tests
// ========================================

#[test]
fn test_nmi_enable_during_vblank_raises_line() {
    let (mut ppu, line) = test_ppu();
    run_to(&mut ppu, 241, 2);
    assert!(ppu.in_vblank());
    line.take(); // drop anything raised at the boundary itself

    ppu.write(PPUCTRL, 0x80);
    assert!(line.is_raised(), "enabling NMI mid-VBlank raises at once");
}

#[test]
fn test_nmi_enable_outside_vblank_stays_quiet() {
    let (mut ppu, line) = test_ppu();
    ppu.write(PPUCTRL, 0x80);
    assert!(!line.is_raised());
}

#[test]
fn test_nametable_select_moves_vram_address() {
    let (mut ppu, _) = test_ppu();

    ppu.write(PPUCTRL, 0x02); // nametable 2
    ppu.write(PPUDATA, 0x42); // lands at the new base

    set_vram_address(&mut ppu, 0x2800);
    ppu.read(PPUDATA);
    assert_eq!(ppu.read(PPUDATA), 0x42);
}

// ========================================
// OAM and Scroll Tests
// ========================================

#[test]
fn test_oam_data_read_write() {
    let (mut ppu, _) = test_ppu();

    ppu.write(OAMADDR, 0x10);
    ppu.write(OAMDATA, 0xAB); // advances OAMADDR
    ppu.write(OAMDATA, 0xCD);

    ppu.write(OAMADDR, 0x10);
    assert_eq!(ppu.read(OAMDATA), 0xAB);
    ppu.write(OAMADDR, 0x11);
    assert_eq!(ppu.read(OAMDATA), 0xCD);
}

#[test]
fn test_scroll_write_pair() {
    let (mut ppu, _) = test_ppu();
    ppu.write(PPUSCROLL, 0x12);
    ppu.write(PPUSCROLL, 0x34);
    assert_eq!(ppu.scroll(), (0x12, 0x34));
}

#[test]
fn test_scroll_shares_write_toggle_with_addr() {
    let (mut ppu, _) = test_ppu();

    // One scroll write arms the toggle; the next PPUADDR write is treated
    // as the second half of a pair
    ppu.write(PPUSCROLL, 0x12);
    ppu.write(PPUADDR, 0x34);

    // Toggle is clear again: this pair must behave normally
    set_vram_address(&mut ppu, 0x2177);
    ppu.write(PPUDATA, 0x5A);
    set_vram_address(&mut ppu, 0x2177);
    ppu.read(PPUDATA);
    assert_eq!(ppu.read(PPUDATA), 0x5A);
}
