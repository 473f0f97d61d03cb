// Threshold bands; each checks the outer band first.

pub fn temperature_band(celsius: f64) -> i32 {
    if celsius < 0.0 || celsius > 35.0 {
        3
    } else if celsius < 5.0 || celsius > 30.0 {
        2
    } else if celsius < 10.0 || celsius > 25.0 {
        1
    } else {
        0
    }
}

pub fn humidity_band(percent: f64) -> i32 {
    if percent < 20.0 || percent > 90.0 {
        2
    } else if percent < 30.0 || percent > 80.0 {
        1
    } else {
        0
    }
}

pub fn progress_band(percent: f64) -> i32 {
    if percent < 10.0 || percent > 90.0 {
        2
    } else if percent < 20.0 || percent > 80.0 {
        1
    } else {
        0
    }
}

// No weight of 2: small and very large crews jump straight to 3.
pub fn worker_band(workers: i64) -> i32 {
    if workers < 5 || workers > 100 {
        3
    } else if workers < 10 || workers > 50 {
        1
    } else {
        0
    }
}
