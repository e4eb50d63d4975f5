/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use colscatter::{
    scatter_columns, Backend, BackendKind, ColumnIndex, Elementwise, Matrix, MatrixView, Runs,
    ScatterColumns, ScatterConfig, ScatterError, ScatterPlan,
};
use colscatter_utils::views::Init;
use half::f16;
use rand::{distr::Uniform, rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use rstest::rstest;

fn backends() -> [Backend; 3] {
    [
        Backend::Runs(Runs::new(true)),
        Backend::Runs(Runs::new(false)),
        Backend::Elementwise(Elementwise),
    ]
}

/// Check every cell of `output` against the definition of the scatter.
fn check<T, I>(params: MatrixView<'_, T>, indices: &[I], pad_value: T, output: &Matrix<T>)
where
    T: Copy + PartialEq + std::fmt::Debug,
    I: ColumnIndex,
{
    for row in 0..output.nrows() {
        for col in 0..output.ncols() {
            let expected = match indices.iter().position(|i| i.to_column() == Some(col)) {
                Some(src) => params[(row, src)],
                None => pad_value,
            };
            assert_eq!(
                output[(row, col)],
                expected,
                "at row {row}, column {col}, indices {indices:?}"
            );
        }
    }
}

#[rstest]
fn documented_example(#[values(0, 1, 2)] backend: usize) {
    let backend = backends()[backend];
    let data = [11.0f32, 12.0, 13.0, 14.0];
    let params = MatrixView::row_vector(&data[..]);
    let mut output = Matrix::new(f32::NAN, 1, 10);

    backend
        .scatter_columns(params, &[7i64, 4, 2, 3], 0.0, output.as_mut_view())
        .unwrap();
    assert_eq!(
        output.as_slice(),
        &[0.0, 0.0, 13.0, 14.0, 12.0, 0.0, 0.0, 11.0, 0.0, 0.0]
    );
}

#[test]
fn duplicate_indices_are_rejected() {
    let params = Matrix::new(1u8, 1, 2);
    let mut output = Matrix::new(0u8, 1, 2);
    let err = scatter_columns(params.as_view(), &[1i32, 1], 9, output.as_mut_view()).unwrap_err();

    let ScatterError::Duplicate(duplicate) = &err else {
        panic!("expected a duplicate error, got {err:?}");
    };
    assert_eq!(duplicate.total(), 2);
    assert_eq!(duplicate.unique(), 1);
    assert!(err.to_string().contains("total number of indices 2"), "{err}");
    assert!(err.to_string().contains("number of unique indices 1"), "{err}");
    assert_eq!(output.as_slice(), &[0, 0]);
}

#[test]
fn out_of_range_indices_are_rejected() {
    let params = Matrix::new(1u8, 1, 1);
    let mut output = Matrix::new(0u8, 1, 5);
    let err = scatter_columns(params.as_view(), &[7u32], 9, output.as_mut_view()).unwrap_err();

    let ScatterError::OutOfRange(range) = &err else {
        panic!("expected an out of range error, got {err:?}");
    };
    assert_eq!(range.position(), 0);
    assert_eq!(range.value(), 7);
    assert_eq!(range.bound(), 5);
    assert_eq!(err.to_string(), "indices(0): 7 is not in range [0, 5)");
    assert_eq!(output.as_slice(), &[0; 5]);
}

#[rstest]
#[case(1, 7)]
#[case(4, 1)]
#[case(3, 0)]
fn all_padding(#[case] rows: usize, #[case] width: usize, #[values(0, 1, 2)] backend: usize) {
    let params = Matrix::<u64>::new(0, rows, 0);
    let mut output = Matrix::new(0u64, rows, width);
    backends()[backend]
        .scatter_columns(params.as_view(), &[] as &[usize], 42, output.as_mut_view())
        .unwrap();
    assert!(output.as_slice().iter().all(|&x| x == 42));
    assert_eq!(output.nrows(), rows);
}

#[rstest]
fn pure_permutation_never_writes_pad(#[values(0, 1, 2)] backend: usize) {
    let mut rng = StdRng::seed_from_u64(0x9e2d_10f3);
    let (rows, cols) = (6, 11);
    let params = Matrix::new(Init(|| rng.random_range(-100.0f32..100.0)), rows, cols);

    let mut indices: Vec<i16> = (0..cols as i16).collect();
    indices.shuffle(&mut rng);

    let plan = ScatterPlan::new(&indices, cols).unwrap();
    assert!(plan.is_permutation());

    let mut output = Matrix::new(0.0f32, rows, cols);
    backends()[backend].scatter_planned(&plan, params.as_view(), f32::NAN, output.as_mut_view());
    assert!(output.as_slice().iter().all(|x| !x.is_nan()));
    check(params.as_view(), &indices, f32::NAN, &output);
}

#[test]
fn rows_are_independent() {
    let mut rng = StdRng::seed_from_u64(0x1234_abcd);
    let (rows, cols, width) = (8, 5, 13);
    let params = Matrix::new(Init(|| rng.random::<u32>()), rows, cols);
    let indices = [12u8, 0, 6, 7, 3];
    let plan = ScatterPlan::new(&indices, width).unwrap();

    for backend in backends() {
        let mut all = Matrix::new(0u32, rows, width);
        backend.scatter_planned(&plan, params.as_view(), 1, all.as_mut_view());

        for row in 0..rows {
            let single = MatrixView::row_vector(params.row(row));
            let mut output = Matrix::new(0u32, 1, width);
            backend.scatter_planned(&plan, single, 1, output.as_mut_view());
            assert_eq!(output.row(0), all.row(row), "row {row}");
        }
    }
}

#[test]
fn half_precision_elements() {
    let mut rng = StdRng::seed_from_u64(0x0ff1ce);
    let dist = Uniform::new(-4.0f32, 4.0).unwrap();
    let (rows, cols, width) = (5, 4, 12);
    let params = Matrix::new(Init(|| f16::from_f32(rng.sample(dist))), rows, cols);
    let indices = [11isize, 2, 3, 9];
    let pad = f16::from_f32(-0.5);

    for backend in backends() {
        let mut output = Matrix::new(f16::ZERO, rows, width);
        backend
            .scatter_columns(params.as_view(), &indices, pad, output.as_mut_view())
            .unwrap();
        check(params.as_view(), &indices, pad, &output);
    }
}

#[test]
fn backends_agree_on_random_problems() {
    let mut rng = StdRng::seed_from_u64(0xdead_beef);
    for trial in 0..200 {
        let width = rng.random_range(0..48usize);
        let cols = rng.random_range(0..=width);
        let rows = rng.random_range(0..6usize);

        let params = Matrix::new(Init(|| rng.random::<i32>()), rows, cols);
        let mut destinations: Vec<i32> = (0..width as i32).collect();
        destinations.shuffle(&mut rng);
        destinations.truncate(cols);

        let outputs: Vec<Matrix<i32>> = backends()
            .iter()
            .map(|backend| {
                let mut output = Matrix::new(0, rows, width);
                backend
                    .scatter_columns(params.as_view(), &destinations, -7, output.as_mut_view())
                    .unwrap();
                output
            })
            .collect();

        check(params.as_view(), &destinations, -7, &outputs[0]);
        assert!(
            outputs.windows(2).all(|pair| pair[0] == pair[1]),
            "backends disagree on trial {trial}"
        );
    }
}

#[test]
fn backend_from_config() {
    let config: ScatterConfig =
        serde_json::from_str(r#"{ "backend": "elementwise" }"#).unwrap();
    let backend = Backend::from(&config);
    assert_eq!(backend.kind(), BackendKind::Elementwise);

    let params = Matrix::new(3i8, 2, 1);
    let mut output = Matrix::new(0i8, 2, 3);
    backend
        .scatter_columns(params.as_view(), &[1u16], -1, output.as_mut_view())
        .unwrap();
    assert_eq!(output.as_slice(), &[-1, 3, -1, -1, 3, -1]);
}

#[test]
fn plan_is_reusable_across_threads() {
    let plan = ScatterPlan::new(&[2u32, 0], 4).unwrap();
    let sources: Vec<Matrix<u16>> = (0..4u16).map(|i| Matrix::new(i, 3, 2)).collect();

    let outputs: Vec<Matrix<u16>> = std::thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|params| {
                let plan = &plan;
                scope.spawn(move || {
                    let mut output = Matrix::new(0u16, 3, 4);
                    let view = output.as_mut_view();
                    Runs::default().scatter_planned(plan, params.as_view(), 99, view);
                    output
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, output) in outputs.iter().enumerate() {
        let i = i as u16;
        for row in output.row_iter() {
            assert_eq!(row, &[i, 99, i, 99]);
        }
    }
}
