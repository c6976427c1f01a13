// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Whole-car runs on the bench model: all five loops under the scheduler plus the capture
//! handler, driven by simulated echo edges and serial frames.

mod common;

use common::*;
use rccar_core::config::timing::*;
use rccar_core::config::{CarConfig, EchoConfig, MOTOR_LIMITS, STEERING_LIMITS};
use rccar_core::control::{ActuationLoop, CarControl, CarState};
use rccar_core::hal::Edge;
use rccar_core::protocol::{Command, CommandLoop, DriveCommand};
use rccar_core::ranging::{EchoIsr, EdgePhase, Ranger};
use rccar_core::sync::GlobalMask;
use rccar_core::task::{ControlLoop, LoopState, Scheduler, Task};
use rccar_core::Shares;

#[test]
fn avoid_mode_steers_only_for_a_close_obstacle() {
    let shares = Shares::new(GlobalMask);
    let tim = timer();
    let motor_out = Output::default();
    let servo_out = Output::default();
    let port = Port::default();
    let mut diag = String::new();
    let mut wdt = FakeWatchdog::default();

    let mut motor = ControlLoop::new(
        "Motor",
        MOTOR_PRIORITY,
        MOTOR_PERIOD_MS,
        ActuationLoop::new(motor_out.clone(), &shares.motor_velocity, MOTOR_LIMITS),
    );
    let mut ranging = ControlLoop::new(
        "USR1",
        RANGING_PRIORITY,
        RANGING_PERIOD_MS,
        Ranger::new(
            BenchSetup(tim.clone()),
            TriggerPin::default(),
            &shares.echo,
            EchoConfig::default(),
        ),
    );
    let mut steering = ControlLoop::new(
        "Steering",
        STEERING_PRIORITY,
        STEERING_PERIOD_MS,
        ActuationLoop::new(servo_out.clone(), &shares.steering_angle, STEERING_LIMITS),
    );
    let mut car = ControlLoop::new(
        "CarControl",
        CAR_CONTROL_PRIORITY,
        CAR_CONTROL_PERIOD_MS,
        CarControl::new(&shares, CarConfig::default()),
    );
    let mut command = ControlLoop::new(
        "Command",
        COMMAND_PRIORITY,
        COMMAND_PERIOD_MS,
        CommandLoop::new(port.clone(), &shares, EchoConfig::default()),
    );
    let mut isr = EchoIsr::new(BenchIsr(tim.clone()), &shares.echo);

    {
        let mut sched = Scheduler::new([
            &mut motor,
            &mut ranging,
            &mut steering,
            &mut car,
            &mut command,
        ]);
        sched.poll(0, &mut diag, &mut wdt);
        assert!(tim.borrow().irq_enabled);
        assert_eq!(tim.borrow().prescaler, 256);

        // First echo: 300 ticks, far away.
        assert_eq!(echo_edge(&tim, &mut isr, Edge::Rising), None);
        advance(&tim, 300);
        assert_eq!(echo_edge(&tim, &mut isr, Edge::Falling), Some(300));
        assert_eq!(shares.echo.pulse_width.get(), 300);
        assert_eq!(shares.echo.phase.get(), EdgePhase::AwaitingRising);

        port.send(&Command::Avoid.frame());
        for now in 1..=20 {
            sched.poll(now, &mut diag, &mut wdt);
        }
        assert_eq!(shares.drive_command.get(), DriveCommand::Avoid);
        assert_eq!(motor_out.last(), Some(0));
        assert_eq!(servo_out.last(), Some(0));

        // Second echo: 100 ticks, obstacle close.
        assert_eq!(echo_edge(&tim, &mut isr, Edge::Rising), None);
        advance(&tim, 100);
        assert_eq!(echo_edge(&tim, &mut isr, Edge::Falling), Some(100));
        for now in 21..=22 {
            sched.poll(now, &mut diag, &mut wdt);
        }
        assert_eq!(shares.steering_angle.get(), 90);
        assert_eq!(motor_out.last(), Some(0));
        assert_eq!(servo_out.last(), Some(90));
    }

    assert_eq!(car.current(), Some(CarState::ObstacleAvoid));
    assert!(diag.contains("Drive command: Avoid"));
    assert!(!diag.contains("Illegal state"));
}

#[test]
fn drive_then_stop_over_serial() {
    let shares = Shares::new(GlobalMask);
    let motor_out = Output::default();
    let port = Port::default();
    let mut diag = String::new();
    let mut wdt = FakeWatchdog::default();

    let mut motor = ControlLoop::new(
        "Motor",
        MOTOR_PRIORITY,
        MOTOR_PERIOD_MS,
        ActuationLoop::new(motor_out.clone(), &shares.motor_velocity, MOTOR_LIMITS),
    );
    let mut car = ControlLoop::new(
        "CarControl",
        CAR_CONTROL_PRIORITY,
        CAR_CONTROL_PERIOD_MS,
        CarControl::new(&shares, CarConfig::default()),
    );
    let mut command = ControlLoop::new(
        "Command",
        COMMAND_PRIORITY,
        COMMAND_PERIOD_MS,
        CommandLoop::new(port.clone(), &shares, EchoConfig::default()),
    );

    let mut sched = Scheduler::new([&mut motor, &mut car, &mut command]);

    run(&mut sched, 0..=5, &mut diag, &mut wdt);
    assert_eq!(motor_out.last(), Some(0));

    port.send(&Command::Drive.frame());
    run(&mut sched, 6..=25, &mut diag, &mut wdt);
    assert_eq!(motor_out.last(), Some(25));

    port.send(&Command::Status.frame());
    port.send(&Command::Stop.frame());
    run(&mut sched, 26..=40, &mut diag, &mut wdt);
    assert_eq!(motor_out.last(), Some(0));
    assert!(diag.contains("Cmd: Drive Motor: 25"));
}

fn run<const N: usize>(
    sched: &mut Scheduler<'_, N>,
    span: std::ops::RangeInclusive<u32>,
    diag: &mut String,
    wdt: &mut FakeWatchdog,
) {
    for now in span {
        sched.poll(now, diag, wdt);
    }
}

#[test]
fn ranging_rearm_resets_the_echo_session() {
    let shares = Shares::new(GlobalMask);
    let tim = timer();
    let mut diag = String::new();
    let mut ranging = ControlLoop::new(
        "USR1",
        RANGING_PRIORITY,
        RANGING_PERIOD_MS,
        Ranger::new(
            BenchSetup(tim.clone()),
            TriggerPin::default(),
            &shares.echo,
            EchoConfig::default(),
        ),
    );
    let mut isr = EchoIsr::new(BenchIsr(tim.clone()), &shares.echo);

    ranging.run_once(&mut diag).unwrap();
    echo_edge(&tim, &mut isr, Edge::Rising);
    assert_eq!(shares.echo.phase.get(), EdgePhase::AwaitingFalling);

    // Back to setup mid-pulse: the next edge must again be read as a pulse start.
    ranging.transition_to(0);
    ranging.run_once(&mut diag).unwrap();
    assert_eq!(tim.borrow().configures, 2);
    assert_eq!(tim.borrow().edge, Edge::Rising);
    assert_eq!(shares.echo.phase.get(), EdgePhase::AwaitingRising);
    assert_eq!(ranging.state(), rccar_core::ranging::RangingState::Ping.raw());
}
