use super::*;

fn cursor_walk(section: SheetSection, len: usize) -> Vec<(u32, u32)> {
    let (mut x, mut y) = section.origin();
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
        out.push((x, y));
        x += COLUMN_STRIDE;
        if x == GRID_RIGHT {
            x = GRID_LEFT;
            y += ROW_STRIDE;
        }
    }
    out
}

#[test]
fn five_columns_per_row() {
    assert_eq!(GRID_COLUMNS, 5);
}

#[test]
fn positions_match_cursor_walk() {
    for section in SheetSection::ALL {
        let expected = cursor_walk(section, 40);
        let got: Vec<_> = section_slots(section, 40).map(GridSlot::position).collect();
        assert_eq!(got, expected);
    }
}

#[test]
fn first_slots_of_each_section() {
    assert_eq!(GridSlot::new(SheetSection::Standard, 0).position(), (45, 285));
    assert_eq!(GridSlot::new(SheetSection::Standard, 4).position(), (1645, 285));
    assert_eq!(GridSlot::new(SheetSection::Standard, 5).position(), (45, 410));
    assert_eq!(GridSlot::new(SheetSection::Deluxe, 0).position(), (45, 1225));
    assert_eq!(GridSlot::new(SheetSection::Deluxe, 14).position(), (1645, 1475));
}

#[test]
fn design_capacity_slots_never_overlap() {
    let mut rects = Vec::new();
    for section in SheetSection::ALL {
        let capacity = (section.design_rows() * GRID_COLUMNS) as usize;
        rects.extend(section_slots(section, capacity).map(GridSlot::rect));
    }
    assert_eq!(rects.len(), 50);
    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            assert!(a.intersect(*b).area() == 0.0, "{a:?} overlaps {b:?}");
        }
        assert!(a.x1 <= 2090.0 && a.y1 <= 1660.0);
    }
}

#[test]
fn display_rank_is_one_based() {
    assert_eq!(GridSlot::new(SheetSection::Deluxe, 0).display_rank(), 1);
    assert_eq!(GridSlot::new(SheetSection::Deluxe, 14).display_rank(), 15);
}
