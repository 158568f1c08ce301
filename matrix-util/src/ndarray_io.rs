use crate::common_io::{read_lines_of_words_delim, write_lines, Delimiter, ReadLinesOut};
use crate::traits::{IoOps, MatWithNames};
use ndarray::prelude::*;
use rayon::prelude::*;
use std::fmt::Display;
use std::str::FromStr;

impl<T> IoOps for Array2<T>
where
    T: FromStr + Send + Sync + Display + Copy,
    <T as FromStr>::Err: Display,
{
    type Scalar = T;
    type Mat = Self;

    fn read_names_delim(
        file: &str,
        delim: impl Into<Delimiter>,
    ) -> anyhow::Result<MatWithNames<Self::Mat>> {
        let ReadLinesOut { lines, header } = read_lines_of_words_delim(file, delim)?;

        if header.len() < 2 {
            return Err(anyhow::anyhow!("{}: header has no column names", file));
        }

        // the first header cell labels the row-name column
        let cols: Vec<Box<str>> = header[1..].to_vec();
        let ncols = cols.len();
        let nrows = lines.len();

        // line numbers below count the header as line 1
        let parsed = lines
            .par_iter()
            .enumerate()
            .map(|(i, words)| -> anyhow::Result<(Box<str>, Vec<T>)> {
                if words.len() != ncols + 1 {
                    return Err(anyhow::anyhow!(
                        "{}: line {} has {} fields, expected {}",
                        file,
                        i + 2,
                        words.len(),
                        ncols + 1
                    ));
                }
                let values = words[1..]
                    .iter()
                    .map(|v| {
                        v.parse::<T>().map_err(|e| {
                            anyhow::anyhow!("{}: line {}: `{}`: {}", file, i + 2, v, e)
                        })
                    })
                    .collect::<anyhow::Result<Vec<T>>>()?;
                Ok((words[0].clone(), values))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let mut rows = Vec::with_capacity(nrows);
        let mut data = Vec::with_capacity(nrows * ncols);
        for (name, values) in parsed {
            rows.push(name);
            data.extend(values);
        }

        Ok(MatWithNames {
            rows,
            cols,
            mat: Array2::from_shape_vec((nrows, ncols), data)?,
        })
    }

    fn write_names_delim(
        &self,
        file: &str,
        names: (&[Box<str>], &[Box<str>]),
        row_column_name: &str,
        delim: &str,
        precision: usize,
    ) -> anyhow::Result<()> {
        let (row_names, col_names) = names;
        anyhow::ensure!(
            row_names.len() == self.nrows(),
            "{} row names for {} rows",
            row_names.len(),
            self.nrows()
        );
        anyhow::ensure!(
            col_names.len() == self.ncols(),
            "{} column names for {} columns",
            col_names.len(),
            self.ncols()
        );

        let mut header = String::from(row_column_name);
        for c in col_names {
            header.push_str(delim);
            header.push_str(c);
        }

        // indexed parallel iterators keep the row order
        let body: Vec<Box<str>> = self
            .axis_iter(Axis(0))
            .into_par_iter()
            .zip(row_names.par_iter())
            .map(|(row, name)| {
                let mut line = name.to_string();
                for x in row.iter() {
                    line.push_str(delim);
                    line.push_str(&format!("{:.*}", precision, x));
                }
                line.into_boxed_str()
            })
            .collect();

        let mut lines = Vec::with_capacity(body.len() + 1);
        lines.push(header.into_boxed_str());
        lines.extend(body);
        write_lines(&lines, file)
    }
}
