//! Free/used per-mille derivation, labels and bar geometry.

use blockwatch::types::DiskInfo;
use blockwatch::usage::{disk_usage, BarLayout, Tier, Usage};

#[test]
fn shares_always_sum_to_a_thousand() {
    let totals = [1u64, 3, 7, 999, 1000, 1001, 65_536, 123_456_789, u64::MAX / 3];
    for total in totals {
        for free in [0, 1, total / 3, total / 2, total - 1, total] {
            let u = Usage::derive(Tier::Bytes, total, free);
            assert_eq!(u.avail_per_mille + u.used_per_mille, 1000, "total={total} free={free}");
            assert_eq!(u.used, total - free);
        }
    }
}

#[test]
fn quarter_free_disk() {
    let u = Usage::derive(Tier::Blocks, 1000, 250);
    assert_eq!(u.avail_per_mille, 250);
    assert_eq!(u.used_per_mille, 750);
    assert_eq!(u.used, 750);
}

#[test]
fn per_mille_rounds_to_nearest() {
    // 1/3 = 333.33..., 2/3 = 666.66...
    assert_eq!(Usage::derive(Tier::Bytes, 3, 1).avail_per_mille, 333);
    assert_eq!(Usage::derive(Tier::Bytes, 3, 2).avail_per_mille, 667);
    // exactly half a per-mille rounds up
    assert_eq!(Usage::derive(Tier::Bytes, 2000, 1).avail_per_mille, 1);
}

#[test]
fn block_labels_round_and_add_up() {
    for (total, free) in [(3, 1), (3, 2), (8, 1), (1000, 995), (1000, 4)] {
        let u = Usage::derive(Tier::Blocks, total, free);
        let avail: u32 = u.avail_label().trim_end_matches('%').parse().unwrap();
        let used: u32 = u.used_label().trim_end_matches('%').parse().unwrap();
        assert_eq!(avail + used, 100, "{total}/{free}");
    }
    // 12.5% free rounds half up
    assert_eq!(Usage::derive(Tier::Blocks, 8, 1).avail_label(), "13%");
}

#[test]
fn labels_by_tier() {
    let blocks = Usage::derive(Tier::Blocks, 3, 1);
    assert_eq!(blocks.avail_label(), "33%");
    assert_eq!(blocks.used_label(), "67%");

    let bytes = Usage::derive(Tier::Bytes, 3, 1);
    assert_eq!(bytes.avail_label(), "33.3%");
    assert_eq!(bytes.used_label(), "66.7%");

    let inodes = Usage::derive(Tier::Inodes, 1000, 1000);
    assert_eq!(inodes.avail_label(), "100.0%");
    assert_eq!(inodes.used_label(), "0.0%");
}

#[test]
fn empty_filesystem_reads_as_full() {
    let u = Usage::derive(Tier::Bytes, 0, 0);
    assert_eq!(u.avail_per_mille, 0);
    assert_eq!(u.used_per_mille, 1000);
    assert_eq!(u.avail_label(), "0.0%");
    assert_eq!(u.used_label(), "100.0%");
}

#[test]
fn free_above_total_is_clamped() {
    let u = Usage::derive(Tier::Inodes, 100, 250);
    assert_eq!(u.free, 100);
    assert_eq!(u.used, 0);
    assert_eq!(u.avail_per_mille, 1000);
}

#[test]
fn bar_splits_free_left_used_right() {
    let b = BarLayout::new(80, 250);
    assert_eq!(b.breakpoint, 20);
    assert_eq!(b.free_label_offset, 60);
    assert_eq!(b.used_label_offset, 20);

    assert_eq!(BarLayout::new(80, 0).breakpoint, 0);
    assert_eq!(BarLayout::new(80, 1000).breakpoint, 80);
    assert_eq!(BarLayout::new(0, 500).breakpoint, 0);
}

#[test]
fn disk_info_yields_three_tiers() {
    let d = DiskInfo {
        totalblocks: 1000,
        freeblocks: 250,
        totalbytes: 4_096_000,
        freebytes: 2_048_000,
        totalinodes: 0,
        freeinodes: 0,
        ..DiskInfo::default()
    };
    let [blocks, bytes, inodes] = disk_usage(&d);
    assert_eq!((blocks.tier, blocks.avail_per_mille), (Tier::Blocks, 250));
    assert_eq!((bytes.tier, bytes.avail_per_mille), (Tier::Bytes, 500));
    assert_eq!((inodes.tier, inodes.used_per_mille), (Tier::Inodes, 1000));
}
