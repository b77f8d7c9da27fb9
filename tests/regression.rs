use gradient_line_fit::reg_lin::cost;
use gradient_line_fit::{fit, fit_with, FitError, Hyperparameters, LineParams, Sample};

fn line_samples(m: f64, c: f64) -> Vec<Sample> {
    (0..=20)
        .map(|i| i as f64 * 0.5)
        .map(|x| Sample::new(x, m * x + c))
        .collect()
}

#[test]
fn fit_is_deterministic() {
    let samples = vec![
        Sample::new(1.0, 2.5),
        Sample::new(2.0, 2.9),
        Sample::new(4.5, 7.1),
        Sample::new(4.5, 7.1),
    ];
    let hp = Hyperparameters::new(500, 0.01).unwrap();

    let a = fit(&samples, hp).unwrap();
    let b = fit(&samples, hp).unwrap();

    assert_eq!(a.m.to_bits(), b.m.to_bits());
    assert_eq!(a.c.to_bits(), b.c.to_bits());
}

#[test]
fn zero_iterations_returns_initial_params() {
    let samples = line_samples(2., 3.);
    for lr in [0.01, 0.5, 10.] {
        let hp = Hyperparameters::new(0, lr).unwrap();

        let mut calls = 0;
        let params = fit_with(&samples, hp, |_| calls += 1).unwrap();

        assert_eq!(params, LineParams { m: 0., c: 0. });
        assert_eq!(calls, 0);
    }
}

#[test]
fn converges_on_noiseless_line() {
    let samples = line_samples(2., 3.);
    let hp = Hyperparameters::new(1000, 0.01).unwrap();

    let mut costs = Vec::new();
    let params = fit_with(&samples, hp, |record| costs.push(record.cost)).unwrap();

    assert_eq!(costs.len(), 1000);
    assert!(
        costs.windows(2).skip(5).all(|w| w[1] <= w[0]),
        "cost increased after warm-up"
    );
    assert!((params.m - 2.).abs() < 0.5, "m = {}", params.m);
    assert!((params.c - 3.).abs() < 0.5, "c = {}", params.c);
}

#[test]
fn single_sample_single_step_is_exact() {
    let samples = [Sample::new(0., 5.)];

    assert_eq!(cost(&samples, LineParams::default()), 25.);

    let hp = Hyperparameters::new(1, 0.01).unwrap();
    let mut records = Vec::new();
    let params = fit_with(&samples, hp, |record| records.push(*record)).unwrap();

    assert_eq!(params, LineParams { m: 0., c: 0.1 });

    // telemetry reports the cost of the updated parameters
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].params(), params);
    assert!((records[0].cost - 24.01).abs() < 1e-9);
    assert_eq!(records[0].to_string(), "cost(0.00, 0.10) = 24.01");
}

#[test]
fn empty_samples_are_degenerate() {
    for iterations in [1, 10, 1000] {
        let hp = Hyperparameters::new(iterations, 0.01).unwrap();
        assert_eq!(fit(&[], hp), Err(FitError::DegenerateInput));
    }
}

#[test]
fn records_arrive_in_iteration_order() {
    let samples = line_samples(-1., 4.);
    let hp = Hyperparameters::new(25, 0.01).unwrap();

    let mut seen = Vec::new();
    let params = fit_with(&samples, hp, |record| seen.push(record.iteration)).unwrap();

    assert_eq!(seen, (0..25).collect::<Vec<_>>());
    assert!(params.m.is_finite() && params.c.is_finite());
}

#[test]
fn separate_fits_do_not_share_state() {
    let a = line_samples(2., 3.);
    let b = line_samples(-4., 1.);
    let hp = Hyperparameters::new(200, 0.01).unwrap();

    let a_alone = fit(&a, hp).unwrap();

    let handles: Vec<_> = [a.clone(), b]
        .into_iter()
        .map(|samples| std::thread::spawn(move || fit(&samples, hp).unwrap()))
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results[0], a_alone);
    assert_ne!(results[0], results[1]);
}
