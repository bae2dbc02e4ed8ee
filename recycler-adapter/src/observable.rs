use recycler::{DataSource, Recycler};

/// Something that can be told its backing dataset changed.
///
/// Hosts that keep the data model elsewhere hold a `&mut dyn DataObservable` to trigger a full
/// rebuild without knowing the concrete data source type.
pub trait DataObservable {
    fn notify_dataset_changed(&mut self);
}

impl<D: DataSource> DataObservable for Recycler<D> {
    fn notify_dataset_changed(&mut self) {
        Recycler::notify_dataset_changed(self);
    }
}
