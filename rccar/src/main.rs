// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![no_main]
#![no_std]

use core::fmt::Write;

use cortex_m_rt::entry;
use panic_halt as _;

use hal::{
    pac::{self, interrupt},
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use rccar::drivers::{Esc, Servo};
use rccar::hw::{usart, BoardPins, Pwm50Hz, Tim3Isr, Tim3Mask, Tim3Setup, Watchdog};
use rccar_core::config::timing::*;
use rccar_core::config::{CarConfig, EchoConfig, MOTOR_LIMITS, STEERING_LIMITS};
use rccar_core::control::{ActuationLoop, CarControl};
use rccar_core::protocol::CommandLoop;
use rccar_core::ranging::{EchoIsr, Ranger};
use rccar_core::sync::IsrCtx;
use rccar_core::task::{ControlLoop, Scheduler};
use rccar_core::Shares;

/// Neutral offset of the ESC on this car, in microseconds.
const ESC_TRIM_US: i16 = 0;

static SHARES: Shares<Tim3Mask> = Shares::new(Tim3Mask);

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();

    let pins = BoardPins::new(dp.GPIOA, dp.GPIOD);

    // USART3 (DBG + commands)
    let usart_cfg = Config {
        baud_rate: 115_200.bps(),
        ..Default::default()
    };
    let serial = Serial::new(dp.USART3, (pins.usart3.tx, pins.usart3.rx), &clocks, usart_cfg);
    let (mut diag, commands) = usart::split(serial);

    let mut wdt = Watchdog::new(dp.IWDG);

    // TIM4 PWM -> ESC + steering servo
    let (esc_out, servo_out) =
        Pwm50Hz::tim4(dp.TIM4, &clocks).split(pins.drive.esc, pins.drive.servo);

    let echo_config = EchoConfig::default().with_report_width(cfg!(feature = "echo-debug"));

    let mut motor = ControlLoop::new(
        "Motor",
        MOTOR_PRIORITY,
        MOTOR_PERIOD_MS,
        ActuationLoop::new(Esc::new(esc_out, ESC_TRIM_US), &SHARES.motor_velocity, MOTOR_LIMITS),
    );
    let mut ranging = ControlLoop::new(
        "USR1",
        RANGING_PRIORITY,
        RANGING_PERIOD_MS,
        Ranger::new(
            Tim3Setup::new(dp.TIM3, pins.ranger.echo),
            pins.ranger.trigger,
            &SHARES.echo,
            echo_config,
        ),
    );
    let mut steering = ControlLoop::new(
        "Steering",
        STEERING_PRIORITY,
        STEERING_PERIOD_MS,
        ActuationLoop::new(Servo::new(servo_out), &SHARES.steering_angle, STEERING_LIMITS),
    );
    let mut car = ControlLoop::new(
        "CarControl",
        CAR_CONTROL_PRIORITY,
        CAR_CONTROL_PERIOD_MS,
        CarControl::new(&SHARES, CarConfig::default()),
    );
    let mut command = ControlLoop::new(
        "Command",
        COMMAND_PRIORITY,
        COMMAND_PERIOD_MS,
        CommandLoop::new(commands, &SHARES, echo_config),
    );

    let mut scheduler = Scheduler::new([
        &mut motor,
        &mut ranging,
        &mut steering,
        &mut car,
        &mut command,
    ]);
    let mut delay = cortex_m::delay::Delay::new(cp.SYST, clocks.sysclk().raw());

    let _ = write!(diag, "RC car up\r\n");

    // Virtual millisecond clock: advanced by exactly the time slept.
    let mut now_ms: u32 = 0;
    loop {
        let idle = scheduler.poll(now_ms, &mut diag, &mut wdt).max(1);
        delay.delay_ms(idle);
        now_ms = now_ms.wrapping_add(idle);
    }
}

#[interrupt]
fn TIM3() {
    static mut ECHO: Option<EchoIsr<'static, Tim3Isr, Tim3Mask>> = None;

    // SAFETY: this is the TIM3 handler, the line the echo cells mask.
    let ctx = unsafe { IsrCtx::new() };
    let echo =
        ECHO.get_or_insert_with(|| EchoIsr::new(unsafe { Tim3Isr::conjure() }, &SHARES.echo));
    echo.on_capture(&ctx);
}
