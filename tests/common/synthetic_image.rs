use anchor_grid::BoundingRect;

pub const ROOF: u8 = 220;
pub const BASE: u8 = 30;

/// Frame filled with `background`, with every rectangle drawn as a house
/// icon: upper half at `ROOF`, lower half at `BASE`.
pub fn frame_with_houses(
    width: usize,
    height: usize,
    background: [u8; 3],
    houses: &[BoundingRect],
) -> Vec<[u8; 3]> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    let mut img = vec![background; width * height];
    for r in houses {
        fill_split(&mut img, width, r, ROOF, BASE);
    }
    img
}

/// Same drawing with the halves swapped, so the base is brighter.
pub fn draw_upside_down(img: &mut [[u8; 3]], width: usize, rect: &BoundingRect) {
    fill_split(img, width, rect, BASE, ROOF);
}

fn fill_split(img: &mut [[u8; 3]], width: usize, r: &BoundingRect, top: u8, bottom: u8) {
    assert!(r.x >= 0 && r.y >= 0, "rectangle must lie inside the frame");
    let mid = r.y + r.height / 2;
    for y in r.y..r.y + r.height {
        let v = if y < mid { top } else { bottom };
        for x in r.x..r.x + r.width {
            img[y as usize * width + x as usize] = [v; 3];
        }
    }
}

/// Houses on a regular 48 px lattice whose sample cells, under offset 0.1
/// and scale 0.8, land on `(54 + 48 i, 60 + 48 j)`.
pub fn lattice_houses(cols: &[i32], rows: &[i32]) -> Vec<BoundingRect> {
    rows.iter()
        .flat_map(|&j| {
            cols.iter()
                .map(move |&i| BoundingRect::new(60 + 48 * i, 65 + 48 * j, 60, 50))
        })
        .collect()
}
