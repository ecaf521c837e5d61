/// Fixed-length history of one channel.
///
/// Always holds exactly the window length of values, oldest to newest, starting as zeros.
/// `push` overwrites the oldest slot in place, so the steady state never allocates.
#[derive(Clone, Debug)]
pub struct RollingBuffer {
    data: Vec<f64>,
    head: usize, // index of the oldest value
}
impl RollingBuffer {
    /// `len` must be non-zero; the store validates it before building buffers.
    pub fn zeroed(len: usize) -> Self {
        debug_assert!(len > 0);
        Self {
            data: vec![0.0; len],
            head: 0,
        }
    }
    /// Drop the oldest value and append `value` as the newest.
    pub fn push(&mut self, value: f64) {
        self.data[self.head] = value;
        self.head = (self.head + 1) % self.data.len();
    }
    /// Replace the contents of `out` with the window, oldest first.
    pub fn copy_into(&self, out: &mut Vec<f64>) {
        let (newer, older) = self.data.split_at(self.head);
        out.clear();
        out.extend_from_slice(older);
        out.extend_from_slice(newer);
    }
    pub fn to_vec(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.data.len());
        self.copy_into(&mut out);
        out
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn starts_as_zeros() {
        let buf = RollingBuffer::zeroed(5);
        assert_eq!(buf.to_vec(), vec![0.0; 5]);
    }
    #[test]
    fn partial_fill_keeps_leading_zeros() {
        let mut buf = RollingBuffer::zeroed(5);
        buf.push(1.0);
        buf.push(2.0);
        assert_eq!(buf.to_vec(), vec![0.0, 0.0, 0.0, 1.0, 2.0]);
    }
    #[test]
    fn wraps_and_keeps_push_order() {
        let mut buf = RollingBuffer::zeroed(3);
        for v in 1..=7 {
            buf.push(v as f64);
            assert_eq!(buf.to_vec().len(), 3);
        }
        assert_eq!(buf.to_vec(), vec![5.0, 6.0, 7.0]);
    }
    #[test]
    fn single_slot_window() {
        let mut buf = RollingBuffer::zeroed(1);
        buf.push(4.0);
        buf.push(9.0);
        assert_eq!(buf.to_vec(), vec![9.0]);
    }
    #[test]
    fn copy_into_reuses_the_target() {
        let mut buf = RollingBuffer::zeroed(4);
        for v in 0..6 {
            buf.push(v as f64);
        }
        let mut out = vec![42.0; 10];
        buf.copy_into(&mut out);
        assert_eq!(out, vec![2.0, 3.0, 4.0, 5.0]);
    }
}
