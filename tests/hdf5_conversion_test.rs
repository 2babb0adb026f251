//! End-to-end conversion of real HDF5 multi-read files
#![cfg(feature = "hdf5")]

use fast5_split::adapters::h5::Hdf5Backend;
use fast5_split::core::convert::{BatchSize, ConversionCoordinator, ConversionSettings, NoProgress};
use hdf5::File;
use std::path::Path;
use tempfile::TempDir;

fn scalar_attr<T: hdf5::H5Type>(location: &hdf5::Group, name: &str, value: T) {
    location
        .new_attr::<T>()
        .shape(())
        .create(name)
        .unwrap()
        .write_scalar(&value)
        .unwrap();
}

/// Write a multi-read file; `None` read numbers omit the attribute
fn write_multi_read(path: &Path, reads: &[(&str, Option<i64>, &[i16])]) {
    let file = File::create(path).unwrap();
    scalar_attr(&file, "file_version", 2.0_f64);
    for (read_id, read_number, signal) in reads {
        let read = file.create_group(&format!("read_{read_id}")).unwrap();

        let raw = read.create_group("Raw").unwrap();
        if let Some(number) = read_number {
            scalar_attr(&raw, "read_number", *number);
        }
        scalar_attr(&raw, "start_time", 12_345_u64);
        raw.new_dataset_builder()
            .with_data(*signal)
            .create("Signal")
            .unwrap();

        let channel = read.create_group("channel_id").unwrap();
        scalar_attr(&channel, "digitisation", 8192.0_f64);
        scalar_attr(&channel, "sampling_rate", 4000.0_f64);
        read.create_group("context_tags").unwrap();
        let tracking = read.create_group("tracking_id").unwrap();
        scalar_attr(&tracking, "exp_start_time", 1_600_000_000_i64);

        let basecall = read
            .create_group("Analyses")
            .unwrap()
            .create_group("Basecall_1D_000")
            .unwrap();
        basecall
            .new_dataset_builder()
            .with_data(&[1_u8, 2, 3][..])
            .create("Fastq")
            .unwrap();
    }
}

fn settings(dir: &TempDir, input: &Path, batch_size: i64) -> ConversionSettings {
    ConversionSettings {
        input: input.to_path_buf(),
        save_path: dir.path().join("single"),
        batch_size: BatchSize::new(batch_size).unwrap(),
        recursive: false,
    }
}

#[test]
fn test_converts_multi_read_file_to_single_read_layout() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("batch_0.fast5");
    write_multi_read(
        &input,
        &[("aaa", Some(7), &[1, 2, 3]), ("bbb", Some(8), &[4, 5])],
    );

    let summary = ConversionCoordinator::new(Hdf5Backend::new(), settings(&dir, &input, 1))
        .execute(&mut NoProgress)
        .unwrap();
    assert_eq!(summary.reads_converted, 2);
    assert!(summary.is_successful());

    let single = dir.path().join("single");
    let mut outputs = [
        single.join("0").join("aaa.fast5"),
        single.join("1").join("bbb.fast5"),
    ];
    if !outputs[0].exists() {
        // link order decides which read gets counter 0
        outputs = [
            single.join("1").join("aaa.fast5"),
            single.join("0").join("bbb.fast5"),
        ];
    }

    let out = File::open(&outputs[0]).unwrap();
    let version: f64 = out.attr("file_version").unwrap().read_scalar().unwrap();
    assert_eq!(version, 2.0);

    let signal = out
        .dataset("Raw/Reads/Read_7/Signal")
        .unwrap()
        .read_raw::<i16>()
        .unwrap();
    assert_eq!(signal, vec![1, 2, 3]);
    let start_time: u64 = out
        .group("Raw/Reads/Read_7")
        .unwrap()
        .attr("start_time")
        .unwrap()
        .read_scalar()
        .unwrap();
    assert_eq!(start_time, 12_345);

    let rate: f64 = out
        .group("UniqueGlobalKey/channel_id")
        .unwrap()
        .attr("sampling_rate")
        .unwrap()
        .read_scalar()
        .unwrap();
    assert_eq!(rate, 4000.0);
    assert!(out.link_exists("UniqueGlobalKey/context_tags"));
    assert!(out.link_exists("UniqueGlobalKey/tracking_id"));
    assert!(!out.link_exists("channel_id"));

    let fastq = out
        .dataset("Analyses/Basecall_1D_000/Fastq")
        .unwrap()
        .read_raw::<u8>()
        .unwrap();
    assert_eq!(fastq, vec![1, 2, 3]);

    assert!(outputs[1].exists());
}

#[test]
fn test_read_without_read_number_leaves_no_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("batch_0.fast5");
    write_multi_read(&input, &[("good", Some(1), &[1]), ("bad", None, &[2])]);

    let summary = ConversionCoordinator::new(Hdf5Backend::new(), settings(&dir, &input, 4000))
        .execute(&mut NoProgress)
        .unwrap();

    assert_eq!(summary.reads_attempted, 2);
    assert_eq!(summary.reads_converted, 1);
    assert_eq!(summary.failures[0].read_id.as_deref(), Some("bad"));
    let batch = dir.path().join("single").join("0");
    assert!(batch.join("good.fast5").exists());
    assert!(!batch.join("bad.fast5").exists());
}

#[test]
fn test_corrupt_file_is_skipped() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input");
    std::fs::create_dir_all(&input).unwrap();
    std::fs::write(input.join("a_corrupt.fast5"), b"not hdf5").unwrap();
    write_multi_read(&input.join("b_valid.fast5"), &[("x", Some(3), &[9, 9])]);

    let summary = ConversionCoordinator::new(Hdf5Backend::new(), settings(&dir, &input, 4000))
        .execute(&mut NoProgress)
        .unwrap();

    assert_eq!(summary.files_failed, 1);
    assert_eq!(summary.reads_converted, 1);
    assert!(dir.path().join("single").join("0").join("x.fast5").exists());
}
