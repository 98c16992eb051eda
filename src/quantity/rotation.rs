quantity!(Rpm, via: f64, suffix: "rpm", precision: 0);
