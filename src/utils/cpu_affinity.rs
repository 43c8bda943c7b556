//! Cross-platform thread pinning for stable timing.
//!
//! Benchmarks migrate between cores at the scheduler's whim, and on
//! heterogeneous parts the core class they land on decides the clock they
//! run at. Pinning the measuring thread removes both noise sources. The
//! convention on big.LITTLE-style parts is that the first enumerated core
//! is an efficiency core and the last a performance core, so those two make
//! useful pin targets alongside "wherever the thread already runs".
//!
//! Pinning is best effort: failures are logged and execution continues with
//! potentially noisier measurements.

// ============================================================================
// Linux implementation using libc
// ============================================================================

#[cfg(target_os = "linux")]
mod platform {
    use std::cell::RefCell;

    thread_local! {
        static ORIGINAL_AFFINITY: RefCell<Option<libc::cpu_set_t>> = const { RefCell::new(None) };
    }

    pub fn core_count() -> Option<usize> {
        unsafe {
            let num_cpus = libc::sysconf(libc::_SC_NPROCESSORS_ONLN);
            if num_cpus <= 0 {
                return None;
            }
            Some(num_cpus as usize)
        }
    }

    pub fn current_core() -> Option<usize> {
        unsafe {
            let cpu = libc::sched_getcpu();
            if cpu >= 0 {
                Some(cpu as usize)
            } else {
                None
            }
        }
    }

    pub fn save_affinity() -> bool {
        unsafe {
            let mut set: libc::cpu_set_t = std::mem::zeroed();
            if libc::sched_getaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &mut set) == 0 {
                ORIGINAL_AFFINITY.with(|cell| {
                    *cell.borrow_mut() = Some(set);
                });
                true
            } else {
                false
            }
        }
    }

    pub fn set_affinity(core_id: usize) -> bool {
        unsafe {
            let mut set: libc::cpu_set_t = std::mem::zeroed();
            libc::CPU_ZERO(&mut set);
            libc::CPU_SET(core_id, &mut set);
            libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set) == 0
        }
    }

    pub fn restore_affinity() -> bool {
        unsafe {
            ORIGINAL_AFFINITY.with(|cell| {
                if let Some(set) = cell.borrow_mut().take() {
                    libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set) == 0
                } else {
                    false
                }
            })
        }
    }
}

// ============================================================================
// macOS: no true affinity from userspace, only hints; treat as unsupported
// ============================================================================

#[cfg(target_os = "macos")]
mod platform {
    pub fn core_count() -> Option<usize> {
        unsafe {
            let num_cpus = libc::sysconf(libc::_SC_NPROCESSORS_ONLN);
            if num_cpus <= 0 {
                return None;
            }
            Some(num_cpus as usize)
        }
    }

    pub fn current_core() -> Option<usize> {
        None
    }

    pub fn save_affinity() -> bool {
        true
    }

    pub fn set_affinity(_core_id: usize) -> bool {
        false
    }

    pub fn restore_affinity() -> bool {
        true
    }
}

// ============================================================================
// Windows implementation
// ============================================================================

#[cfg(target_os = "windows")]
mod platform {
    use std::cell::RefCell;

    type HANDLE = *mut std::ffi::c_void;
    type DWORD = u32;
    type DWORD_PTR = usize;

    extern "system" {
        fn GetCurrentThread() -> HANDLE;
        fn SetThreadAffinityMask(hThread: HANDLE, dwThreadAffinityMask: DWORD_PTR) -> DWORD_PTR;
        fn GetSystemInfo(lpSystemInfo: *mut SYSTEM_INFO);
    }

    #[repr(C)]
    struct SYSTEM_INFO {
        wProcessorArchitecture: u16,
        wReserved: u16,
        dwPageSize: DWORD,
        lpMinimumApplicationAddress: *mut std::ffi::c_void,
        lpMaximumApplicationAddress: *mut std::ffi::c_void,
        dwActiveProcessorMask: DWORD_PTR,
        dwNumberOfProcessors: DWORD,
        dwProcessorType: DWORD,
        dwAllocationGranularity: DWORD,
        wProcessorLevel: u16,
        wProcessorRevision: u16,
    }

    thread_local! {
        static ORIGINAL_MASK: RefCell<Option<DWORD_PTR>> = const { RefCell::new(None) };
    }

    fn system_info() -> SYSTEM_INFO {
        unsafe {
            let mut info: SYSTEM_INFO = std::mem::zeroed();
            GetSystemInfo(&mut info);
            info
        }
    }

    pub fn core_count() -> Option<usize> {
        let n = system_info().dwNumberOfProcessors as usize;
        if n == 0 {
            None
        } else {
            Some(n)
        }
    }

    pub fn current_core() -> Option<usize> {
        None
    }

    pub fn save_affinity() -> bool {
        unsafe {
            let handle = GetCurrentThread();
            let all_cores = system_info().dwActiveProcessorMask;
            // SetThreadAffinityMask returns the previous mask; set-and-restore
            // is the only way to read it.
            let old_mask = SetThreadAffinityMask(handle, all_cores);
            if old_mask != 0 {
                SetThreadAffinityMask(handle, old_mask);
                ORIGINAL_MASK.with(|cell| {
                    *cell.borrow_mut() = Some(old_mask);
                });
                true
            } else {
                false
            }
        }
    }

    pub fn set_affinity(core_id: usize) -> bool {
        unsafe {
            let handle = GetCurrentThread();
            let mask: DWORD_PTR = 1 << core_id;
            SetThreadAffinityMask(handle, mask) != 0
        }
    }

    pub fn restore_affinity() -> bool {
        unsafe {
            ORIGINAL_MASK.with(|cell| {
                if let Some(mask) = cell.borrow_mut().take() {
                    let handle = GetCurrentThread();
                    SetThreadAffinityMask(handle, mask) != 0
                } else {
                    false
                }
            })
        }
    }
}

// ============================================================================
// Fallback for unsupported platforms
// ============================================================================

#[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
mod platform {
    pub fn core_count() -> Option<usize> {
        None
    }
    pub fn current_core() -> Option<usize> {
        None
    }
    pub fn save_affinity() -> bool {
        true
    }
    pub fn set_affinity(_core_id: usize) -> bool {
        false
    }
    pub fn restore_affinity() -> bool {
        true
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Which core the measuring thread should be pinned to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PinTarget {
    /// The core the thread is already running on. Prevents migration
    /// without forcing a core class.
    #[default]
    Current,
    /// The first enumerated core (efficiency class on heterogeneous parts).
    First,
    /// The last enumerated core (performance class on heterogeneous parts).
    Last,
}

/// Number of online CPU cores.
pub fn core_count() -> Option<usize> {
    platform::core_count()
}

/// The core the calling thread is currently running on.
pub fn current_core() -> Option<usize> {
    platform::current_core()
}

fn resolve_target(target: PinTarget) -> Option<usize> {
    match target {
        PinTarget::Current => platform::current_core().or(Some(0)),
        PinTarget::First => Some(0),
        PinTarget::Last => core_count().map(|n| n - 1),
    }
}

/// Pin the calling thread to the core selected by `target`, saving the
/// previous affinity so it can be restored.
///
/// Returns the core pinned to, or `None` on failure (which is logged, not
/// propagated).
pub fn pin(target: PinTarget) -> Option<usize> {
    let Some(core_id) = resolve_target(target) else {
        log::warn!("cannot resolve pin target {:?}: core enumeration failed", target);
        return None;
    };
    platform::save_affinity();
    if platform::set_affinity(core_id) {
        Some(core_id)
    } else {
        log::warn!("failed to pin thread to core {}", core_id);
        None
    }
}

/// Restore the affinity saved by the last [`pin`] on this thread.
pub fn unpin() -> bool {
    platform::restore_affinity()
}

// ============================================================================
// RAII Guard
// ============================================================================

/// RAII guard: pins on creation, unpins on drop.
///
/// Keeps the thread pinned for exactly the scope of a measurement even if
/// the measured code panics.
pub struct CpuPinGuard {
    pinned_core: Option<usize>,
}

impl CpuPinGuard {
    /// Pin to the core selected by `target`.
    pub fn new(target: PinTarget) -> Self {
        Self {
            pinned_core: pin(target),
        }
    }

    /// The core this thread is pinned to, if pinning succeeded.
    pub fn core_id(&self) -> Option<usize> {
        self.pinned_core
    }

    /// Whether the thread was actually pinned.
    pub fn is_pinned(&self) -> bool {
        self.pinned_core.is_some()
    }
}

impl Drop for CpuPinGuard {
    fn drop(&mut self) {
        if self.pinned_core.is_some() {
            unpin();
        }
    }
}

impl Default for CpuPinGuard {
    fn default() -> Self {
        Self::new(PinTarget::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_count_is_positive() {
        if let Some(n) = core_count() {
            assert!(n > 0);
        }
    }

    #[test]
    fn last_core_resolves_in_range() {
        if let (Some(core), Some(n)) = (resolve_target(PinTarget::Last), core_count()) {
            assert_eq!(core, n - 1);
        }
    }

    #[test]
    fn pin_guard_cycle() {
        let guard = CpuPinGuard::new(PinTarget::Current);
        if guard.is_pinned() {
            assert!(guard.core_id().is_some());
        }
        drop(guard);

        let first = CpuPinGuard::new(PinTarget::First);
        if first.is_pinned() {
            assert_eq!(first.core_id(), Some(0));
        }
    }
}
