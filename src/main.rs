use std::{io, sync::Arc};

use dynarray_common::{
    prelude::*,
    collections::{DoubleOrMinReserveStrategy, Error, Pow2ReserveStrategy, Result},
};
use dynarray_logging::{log_error, log_info, set_logger, LogCategory, LogLevel, Logger};
use parking_lot::Mutex;

pub const LOG_CAT : LogCategory = LogCategory::new("Main");

static LOGGER : Logger = Logger::new();

/// Log writer that keeps everything it receives in a dynamic array
#[derive(Clone, Default)]
struct CaptureWriter(Arc<Mutex<DynamicArray<u8>>>);

impl CaptureWriter {
    fn len(&self) -> usize {
        self.0.lock().len()
    }

    fn contents(&self) -> String {
        String::from_utf8_lossy(self.0.lock().as_slice()).into_owned()
    }
}

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend(buf.iter().copied());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn setup_globals(capture: &CaptureWriter) {
    LOGGER.set_max_level(LogLevel::Info);
    if LOGGER.add_writer(Box::new(capture.clone())).is_err() {
        println!("No free writer slot for the log capture");
    }
    set_logger(&LOGGER);
}

fn main() {
    dynarray_logging::start_clock();
    let capture = CaptureWriter::default();
    setup_globals(&capture);

    if let Err(err) = actual_main() {
        log_error!(LOG_CAT, main, "Demo failed: {}", err);
    }

    LOGGER.flush();
    println!("Captured {} bytes of log output", capture.len());
}

fn actual_main() -> Result<()> {
    let mut arr = DynamicArray::new();
    for i in 0..5 {
        arr.push(i);
    }
    log_info!(LOG_CAT, "Pushed 5 elements: {} (len {}, capacity {})", arr, arr.len(), arr.capacity());

    arr.insert(0, 100)?;
    arr.insert(3, 200)?;
    let len = arr.len();
    arr.insert(len, 300)?;
    log_info!(LOG_CAT, "After inserts: {}", arr);

    let removed = arr.remove(3)?;
    log_info!(LOG_CAT, "Removed {} at index 3: {}", removed, arr);

    arr.remove_where(|x| x % 2 == 1);
    log_info!(LOG_CAT, "Without odd values: {}", arr);

    match arr.index_of(&300) {
        Some(idx) => log_info!(LOG_CAT, "Found 300 at index {}", idx),
        None => log_info!(LOG_CAT, "300 is missing"),
    }

    arr.sort_by(|a, b| b.cmp(a));
    log_info!(LOG_CAT, "Sorted descending: {}", arr);

    let copy = arr.clone();
    arr.set_capacity(arr.len() + 1)?;
    log_info!(LOG_CAT, "Copy still equal after changing the capacity: {}", copy == arr);

    let mut words: DynamicArray<String> = ["pear", "apple", "fig"].map(String::from).into();
    words.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    log_info!(LOG_CAT, "Words by length: {}", words);

    let mut grow = DynamicArray::with_capacity(1)?;
    for i in 0..10 {
        grow.push(i);
        log_info!(LOG_CAT, "len {:2}, capacity {:2}, spare: {}", grow.len(), grow.capacity(), grow.has_spare_capacity());
    }

    let mut doubling = DynamicArray::<i32, DoubleOrMinReserveStrategy>::with_capacity_and_strategy(3)?;
    let mut pow2 = DynamicArray::<i32, Pow2ReserveStrategy>::with_capacity_and_strategy(3)?;
    for i in 0..10 {
        doubling.push(i);
        pow2.push(i);
    }
    log_info!(LOG_CAT, "Capacity after 10 pushes from 3 slots: double-or-min {}, power-of-two {}", doubling.capacity(), pow2.capacity());

    if let Err(err) = DynamicArray::<u8>::with_capacity(0) {
        log_info!(LOG_CAT, "Rejected capacity 0: {}", err);
    }
    if let Err(Error::IndexOutOfBounds { index, len }) = grow.get(42) {
        log_info!(LOG_CAT, "Index {} is outside of {} elements", index, len);
    }

    let total = words.iter().map(String::len).fold(0, |acc, len| acc + len);
    log_info!(LOG_CAT, "Total word length: {}", total);

    Ok(())
}
