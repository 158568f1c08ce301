use matrix_util::common_io::create_temp_dir_file;
use matrix_util::traits::{IoOps, MatWithNames, SampleOps};

fn str_vec(n: usize, prefix: &str) -> Vec<Box<str>> {
    (0..n)
        .map(|i| format!("{prefix}{i}").into_boxed_str())
        .collect()
}

#[test]
fn ndarray_named_csv_gz_test() -> anyhow::Result<()> {
    let xx = ndarray::Array2::<f64>::runif(20, 12);
    let rows = str_vec(20, "gene");
    let cols = str_vec(12, "sample");

    let (_dir, csv_file) = create_temp_dir_file("csv.gz")?;
    let csv_file = csv_file.to_str().unwrap();
    xx.to_csv_with_names(csv_file, (&rows, &cols), 9)?;

    let MatWithNames {
        rows: rows_in,
        cols: cols_in,
        mat: yy,
    } = ndarray::Array2::<f64>::from_csv_with_names(csv_file)?;

    assert_eq!(rows, rows_in);
    assert_eq!(cols, cols_in);
    approx::assert_abs_diff_eq!(xx, yy, epsilon = 1e-8);

    Ok(())
}

#[test]
fn ndarray_named_tsv_skips_comments() -> anyhow::Result<()> {
    let (_dir, tsv_file) = create_temp_dir_file("tsv")?;
    let tsv_file = tsv_file.to_str().unwrap();
    std::fs::write(
        tsv_file,
        "# expression\nName\tS1\tS2\tS3\nA\t1\t2\t3\n\nB\t4\t5\t6\n",
    )?;

    let MatWithNames { rows, cols, mat } = ndarray::Array2::<f64>::from_tsv_with_names(tsv_file)?;

    let expected: Vec<Box<str>> = vec!["A".into(), "B".into()];
    assert_eq!(rows, expected);
    assert_eq!(cols.len(), 3);
    assert_eq!(mat, ndarray::array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);

    Ok(())
}
