//! Synthetic CSV fixtures for unit tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::features::layout::{FEATURE_LAYOUT, ID_COLUMN, TARGET_COLUMN};

pub const HEADER_COLUMNS: usize = 26;

pub fn header() -> String {
    let mut cols = vec![ID_COLUMN];
    cols.extend_from_slice(FEATURE_LAYOUT);
    cols.push(TARGET_COLUMN);
    cols.join(",")
}

/// One synthetic patient; CKD patients get worse labs
pub fn patient_row(id: usize, ckd: bool, rng: &mut StdRng) -> String {
    let jitter = |rng: &mut StdRng, base: f64, spread: f64| base + rng.gen_range(-spread..spread);
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };

    let (sc, hemo, bgr, al) = if ckd {
        (jitter(rng, 4.0, 1.5), jitter(rng, 9.5, 1.5), jitter(rng, 180.0, 40.0), 3)
    } else {
        (jitter(rng, 0.9, 0.3), jitter(rng, 15.0, 1.5), jitter(rng, 105.0, 15.0), 0)
    };

    let fields = [
        id.to_string(),
        format!("{:.0}", jitter(rng, 50.0, 20.0)),
        if ckd { "90".into() } else { "70".into() },
        if ckd { "1.010".into() } else { "1.020".into() },
        al.to_string(),
        "0".into(),
        if ckd { "abnormal".into() } else { "normal".into() },
        if ckd { "abnormal".into() } else { "normal".into() },
        if ckd { "present".into() } else { "notpresent".into() },
        "notpresent".into(),
        format!("{:.0}", bgr),
        format!("{:.0}", jitter(rng, if ckd { 60.0 } else { 30.0 }, 10.0)),
        format!("{:.1}", sc),
        format!("{:.0}", jitter(rng, 138.0, 4.0)),
        format!("{:.1}", jitter(rng, 4.5, 0.5)),
        format!("{:.1}", hemo),
        format!("{:.0}", hemo * 3.0),
        format!("{:.0}", jitter(rng, 8000.0, 1500.0)),
        format!("{:.1}", jitter(rng, if ckd { 3.8 } else { 5.2 }, 0.4)),
        yes_no(ckd).into(),
        yes_no(ckd && id % 2 == 0).into(),
        "no".into(),
        if ckd && id % 3 == 0 { "poor".into() } else { "good".into() },
        yes_no(ckd && id % 4 == 0).into(),
        yes_no(ckd && id % 5 == 0).into(),
        if ckd { "ckd".into() } else { "notckd".into() },
    ];
    fields.join(",")
}

/// `n` complete rows, alternating classes, plus `incomplete` rows carrying `?`
pub fn synthetic_csv(n: usize, incomplete: usize) -> String {
    let mut rng = StdRng::seed_from_u64(7);
    let mut lines = vec![header()];

    for id in 0..n {
        lines.push(patient_row(id, id % 2 == 0, &mut rng));
    }
    for k in 0..incomplete {
        let row = patient_row(n + k, k % 2 == 0, &mut rng);
        let mut cells: Vec<&str> = row.split(',').collect();
        cells[1 + (k % FEATURE_LAYOUT.len())] = "?";
        lines.push(cells.join(","));
    }

    lines.join("\n") + "\n"
}
